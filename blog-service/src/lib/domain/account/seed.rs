use crate::account::errors::AccountError;
use crate::account::models::CreateAccountCommand;
use crate::account::models::EmailAddress;
use crate::account::models::PersonName;
use crate::account::models::Role;

const DEMO_ACCOUNTS: [(&str, &str, &str, Role); 3] = [
    ("Admin", "User", "admin@example.com", Role::Admin),
    ("Moderator", "User", "moderator@example.com", Role::Moderator),
    ("Regular", "User", "user@example.com", Role::User),
];

/// One demo account per role, all sharing `password`.
///
/// # Errors
/// * `InvalidName` / `InvalidEmail` - Never for the built-in accounts
pub fn demo_accounts(password: &str) -> Result<Vec<CreateAccountCommand>, AccountError> {
    DEMO_ACCOUNTS
        .iter()
        .map(|(first_name, last_name, email, role)| {
            Ok(CreateAccountCommand {
                first_name: PersonName::new(first_name.to_string())?,
                last_name: PersonName::new(last_name.to_string())?,
                email: EmailAddress::new(email.to_string())?,
                password: password.to_string(),
                role: *role,
            })
        })
        .collect()
}
