//! Account commands.
//!
//! The session is written to `LARQ_STORAGE_PATH`, so it survives between
//! invocations until `larq account logout`.

use larq_storefront::forms::{LoginForm, SignupForm};
use larq_storefront::state::Storefront;
use larq_storefront::storage::KeyValueStore;

use super::CommandError;

/// Create an account and sign in.
///
/// # Errors
///
/// Returns an error if the form is invalid or the email is taken.
pub fn signup<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<String, CommandError> {
    let session = shop.signup(&SignupForm::new(name, email, password, confirm))?;
    Ok(format!("Compte créé. Bienvenue, {} !", session.name))
}

/// Sign in.
///
/// # Errors
///
/// Returns an error if a field is empty or the credentials do not match.
pub fn login<S: KeyValueStore>(
    shop: &mut Storefront<S>,
    email: &str,
    password: &str,
) -> Result<String, CommandError> {
    let session = shop.login(&LoginForm::new(email, password))?;
    Ok(format!("Connecté en tant que {} ({})", session.name, session.email))
}

/// Sign out.
pub fn logout<S: KeyValueStore>(shop: &mut Storefront<S>) -> String {
    shop.logout();
    "Déconnecté".to_string()
}

/// Show the signed-in account.
pub fn whoami<S: KeyValueStore>(shop: &Storefront<S>) -> String {
    shop.session().map_or_else(
        || "Non connecté".to_string(),
        |session| format!("{} ({})", session.name, session.email),
    )
}
