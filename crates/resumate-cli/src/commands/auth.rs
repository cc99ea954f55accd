use anyhow::Result;
use colored::Colorize;

use resumate_application::ResumateApp;
use resumate_core::session::{Session, timestamp};
use resumate_core::theme::Theme;

use super::prompt_password;
use crate::render::heading;

pub async fn login(app: &ResumateApp, email: &str, password: Option<String>, theme: Theme) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_password("Password")?,
    };

    let session = app.auth.login(email, &password).await?;
    print_welcome(&session, theme);
    Ok(())
}

pub async fn register(
    app: &ResumateApp,
    full_name: &str,
    email: &str,
    password: Option<String>,
    confirm_password: Option<String>,
    theme: Theme,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_password("Password")?,
    };
    let confirm_password = match confirm_password {
        Some(confirm) => confirm,
        None => prompt_password("Confirm password")?,
    };

    let session = app
        .auth
        .register(full_name, email, &password, &confirm_password)
        .await?;
    print_welcome(&session, theme);
    Ok(())
}

pub fn logout(app: &ResumateApp) -> Result<()> {
    app.auth.logout()?;
    println!("{}", "Signed out.".green());
    Ok(())
}

pub fn whoami(app: &ResumateApp, theme: Theme) {
    let session = app.auth.current_session();
    let user = match (&session.user, app.auth.is_signed_in()) {
        (Some(user), true) => user,
        _ => {
            println!("{}", "Not signed in.".bright_black());
            return;
        }
    };

    println!(
        "{} {} ({})",
        heading(&format!("[{}]", user.initials()), theme),
        user.display_name(),
        user.email
    );
    println!("  Role:    {}", user.primary_role());
    if let Some(expires_at) = session.expires_at() {
        println!("  Expires: {}", timestamp::display_local(expires_at));
    }
}

pub async fn refresh(app: &ResumateApp, theme: Theme) -> Result<()> {
    let session = app.auth.refresh().await?;
    print_welcome(&session, theme);
    Ok(())
}

fn print_welcome(session: &Session, theme: Theme) {
    match &session.user {
        Some(user) => println!(
            "{} {}",
            heading("Welcome,", theme),
            user.display_name().bold()
        ),
        None => println!("{}", "Signed in.".green()),
    }
}
