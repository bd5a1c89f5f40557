use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use dialoguer::Password;

use crate::api::client::RaygunClient;
use crate::api::models::Application;
use crate::context::AppContext;
use crate::display::ui;

#[derive(Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommands,
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Store a Raygun API token in the system keyring
    Login,
    /// Remove the stored token
    Logout,
    /// Check that the available token works
    Status {
        /// Raygun API access token
        #[arg(short, long, env = "RAYGUN_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
}

/// Verify a token by listing a single application
async fn verify_token(ctx: &AppContext, token: &str) -> Result<Vec<Application>> {
    let client = RaygunClient::new(ctx.settings.raygun_api_url.clone(), token.to_string())?;
    client
        .list_applications(1)
        .await
        .context("API authentication failed")
}

mod messages;
use messages::auth as msg;

pub async fn handle(ctx: &AppContext, args: AuthArgs) -> Result<()> {
    match args.command {
        AuthCommands::Login => {
            let token = Password::new()
                .with_prompt("Raygun API token")
                .allow_empty_password(true)
                .interact()?;
            let token = token.trim();

            if token.is_empty() {
                ui::error(msg::EMPTY_TOKEN);
                return Ok(());
            }

            ui::info(msg::VERIFYING_TOKEN);
            verify_token(ctx, token).await?;
            crate::utils::auth::save_token(token)?;

            ui::success(msg::AUTH_SUCCESS);
            ui::info(msg::TOKEN_SAVED);
        }
        AuthCommands::Logout => {
            crate::utils::auth::delete_token()?;
            ui::success(msg::LOGGED_OUT);
        }
        AuthCommands::Status { token } => {
            ui::info(msg::CHECKING_STATUS);

            let token = match crate::utils::auth::resolve_token(token.as_deref()) {
                Ok(token) => token,
                Err(e) => {
                    ui::error(&format!("{}: {}", msg::NOT_AUTHENTICATED, e));
                    ui::info(msg::LOGIN_REQUIRED);
                    return Ok(());
                }
            };

            match verify_token(ctx, &token).await {
                Ok(applications) => {
                    ui::success(msg::AUTHENTICATED);
                    let mut info = vec![("API", ctx.settings.raygun_api_url.clone())];
                    if let Some(app) = applications.first() {
                        info.push(("First project", app.name.clone()));
                    }
                    crate::utils::formatting::print_key_value_table(info);
                }
                Err(e) => {
                    ui::error(&format!("{}: {:#}", msg::NOT_AUTHENTICATED, e));
                    ui::info(msg::LOGIN_REQUIRED);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::manager::AppConfig;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn context_for(server: &MockServer) -> AppContext {
        let mut settings = AppConfig::default().settings();
        settings.raygun_api_url = server.uri();
        AppContext::new(settings)
    }

    #[tokio::test]
    async fn test_verify_token_lists_one_application() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/applications"))
            .and(query_param("count", "1"))
            .and(header("authorization", "Bearer good"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"[{"identifier":"a","name":"Shop"}]"#, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let apps = verify_token(&context_for(&server), "good").await.unwrap();
        assert_eq!(apps[0].name, "Shop");
    }

    #[tokio::test]
    async fn test_verify_token_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/applications"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
            .mount(&server)
            .await;

        let err = verify_token(&context_for(&server), "bad").await.unwrap_err();
        assert!(format!("{:#}", err).contains("403"));
    }
}
