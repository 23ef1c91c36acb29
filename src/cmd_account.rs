//! Account commands: whoami and logout.

use highlighter_config::Config;
use highlighter_core::SignInOutcome;

use crate::adapters::build_services;

pub(crate) async fn run_whoami(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let services = build_services(config);

    match services.auth.authenticate().await? {
        SignInOutcome::SignedIn => {
            let user = services.auth.user_info().await?;
            if user.name.is_empty() {
                println!("{}", user.email);
            } else {
                println!("{} <{}>", user.name, user.email);
            }
        }
        SignInOutcome::Denied(reason) => {
            println!("Not signed in: {}", reason);
        }
    }
    Ok(())
}

pub(crate) async fn run_logout(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let services = build_services(config);
    services.auth.invalidate().await?;
    println!("Signed out");
    Ok(())
}
