use inquire::{Password, PasswordDisplayMode, Text};
use rulate_scraping_utils::credentials::Credentials;

/// Asks for the login and the password on the terminal.
/// The password is masked while typing.
pub fn prompt_credentials() -> anyhow::Result<Credentials> {
    let login = Text::new("Login:").prompt()?;
    let password = Password::new("Password:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    Ok(Credentials::builder()
        .login(login.into())
        .password(password.into())
        .build())
}
