// Credential resolution and session establishment

use std::path::{Path, PathBuf};

use super::{ControllerApi, Session};
use crate::error::{AppError, AppResult};
use crate::prompt::Prompter;

/// Where the credentials for this run come from, highest priority first
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    CliToken(String),
    TokenFile(PathBuf),
    EnvXAuthToken(String),
    EnvAuthToken(String),
    Interactive,
}

impl CredentialSource {
    fn describe(&self) -> String {
        match self {
            CredentialSource::CliToken(_) => "Authenticating using Auth-Token in from CLI ARGS".to_string(),
            CredentialSource::TokenFile(path) => {
                format!("Authenticating using Auth-token from file {}", path.display())
            }
            CredentialSource::EnvXAuthToken(_) => {
                "Authenticating using environment variable X_AUTH_TOKEN".to_string()
            }
            CredentialSource::EnvAuthToken(_) => {
                "Authenticating using environment variable AUTH_TOKEN".to_string()
            }
            CredentialSource::Interactive => "Authenticating using interactive login".to_string(),
        }
    }
}

/// Pick the credential source: CLI token, token file, `X_AUTH_TOKEN`,
/// `AUTH_TOKEN`, then interactive login. Empty values count as unset.
pub fn resolve_credentials<F>(
    token: Option<&str>,
    token_file: Option<&Path>,
    env: F,
) -> CredentialSource
where
    F: Fn(&str) -> Option<String>,
{
    let env = |key: &str| env(key).filter(|value| !value.is_empty());

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        CredentialSource::CliToken(token.to_string())
    } else if let Some(path) = token_file {
        CredentialSource::TokenFile(path.to_path_buf())
    } else if let Some(token) = env("X_AUTH_TOKEN") {
        CredentialSource::EnvXAuthToken(token)
    } else if let Some(token) = env("AUTH_TOKEN") {
        CredentialSource::EnvAuthToken(token)
    } else {
        CredentialSource::Interactive
    }
}

fn read_token_file(path: &Path) -> AppResult<String> {
    Ok(std::fs::read_to_string(path)?.trim().to_string())
}

/// Establish a session from `source`.
///
/// A token that does not resolve to a tenant is fatal. A blank token file
/// falls back to interactive login, which keeps asking until the controller
/// accepts the credentials.
pub async fn authenticate<C, P>(
    api: &mut C,
    source: &CredentialSource,
    prompter: &mut P,
) -> AppResult<Session>
where
    C: ControllerApi + ?Sized,
    P: Prompter + ?Sized,
{
    println!("AUTHENTICATING...");
    println!("     {}", source.describe());

    let token = match source {
        CredentialSource::CliToken(token)
        | CredentialSource::EnvXAuthToken(token)
        | CredentialSource::EnvAuthToken(token) => Some(token.clone()),
        CredentialSource::TokenFile(path) => Some(read_token_file(path)?),
        CredentialSource::Interactive => None,
    }
    .filter(|token| !token.is_empty());

    let session = match token {
        Some(token) => match api.use_token(&token).await? {
            Some(session) => session,
            None => {
                return Err(AppError::Auth("token did not resolve to a tenant".to_string()));
            }
        },
        None => interactive_login(api, prompter).await?,
    };

    tracing::info!("Authenticated to tenant {}", session.tenant_id);
    println!("     SUCCESS: Authentication Complete");
    Ok(session)
}

async fn interactive_login<C, P>(api: &mut C, prompter: &mut P) -> AppResult<Session>
where
    C: ControllerApi + ?Sized,
    P: Prompter + ?Sized,
{
    loop {
        let email = prompter.ask("Email: ")?;
        let password = prompter.ask_secret("Password: ")?;

        if let Some(session) = api.login(email.trim(), &password).await? {
            return Ok(session);
        }
        println!("Login failed, please try again.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::fake::{Call, FakeController};
    use crate::prompt::ScriptedPrompter;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_credential_precedence() {
        let env = env_of(&[("X_AUTH_TOKEN", "xtok"), ("AUTH_TOKEN", "tok")]);
        let file = Path::new("/tmp/token.txt");

        assert_eq!(
            resolve_credentials(Some("cli"), Some(file), &env),
            CredentialSource::CliToken("cli".to_string())
        );
        assert_eq!(
            resolve_credentials(None, Some(file), &env),
            CredentialSource::TokenFile(file.to_path_buf())
        );
        assert_eq!(
            resolve_credentials(None, None, &env),
            CredentialSource::EnvXAuthToken("xtok".to_string())
        );
        assert_eq!(
            resolve_credentials(None, None, env_of(&[("AUTH_TOKEN", "tok")])),
            CredentialSource::EnvAuthToken("tok".to_string())
        );
        assert_eq!(
            resolve_credentials(None, None, env_of(&[])),
            CredentialSource::Interactive
        );
    }

    #[test]
    fn test_empty_values_are_unset() {
        let env = env_of(&[("X_AUTH_TOKEN", ""), ("AUTH_TOKEN", "tok")]);
        assert_eq!(
            resolve_credentials(Some(""), None, env),
            CredentialSource::EnvAuthToken("tok".to_string())
        );
    }

    #[tokio::test]
    async fn test_token_file_is_trimmed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  good-token  ").unwrap();

        let mut api = FakeController {
            valid_tokens: vec!["good-token".to_string()],
            ..Default::default()
        };
        let source = CredentialSource::TokenFile(file.path().to_path_buf());
        let session = authenticate(&mut api, &source, &mut ScriptedPrompter::default())
            .await
            .unwrap();

        assert_eq!(session.token, "good-token");
        assert_eq!(api.calls(), vec![Call::UseToken("good-token".to_string())]);
    }

    #[tokio::test]
    async fn test_blank_token_file_falls_back_to_interactive_login() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  \t ").unwrap();

        let mut api = FakeController {
            valid_logins: vec![("ops@example.com".to_string(), "right".to_string())],
            ..Default::default()
        };
        let source = CredentialSource::TokenFile(file.path().to_path_buf());
        let mut prompter = ScriptedPrompter::new(["ops@example.com", "right"]);

        let session = authenticate(&mut api, &source, &mut prompter).await.unwrap();

        assert_eq!(session.tenant_id, "tenant-1");
        assert_eq!(api.calls(), vec![Call::Login("ops@example.com".to_string())]);
        assert_eq!(prompter.asked(), ["Email: ", "Password: "]);
    }

    #[tokio::test]
    async fn test_rejected_token_is_fatal_without_retry() {
        let mut api = FakeController::default();
        let source = CredentialSource::CliToken("stale".to_string());
        let mut prompter = ScriptedPrompter::new(["someone@example.com", "secret"]);

        let result = authenticate(&mut api, &source, &mut prompter).await;

        assert!(matches!(result, Err(AppError::Auth(_))));
        assert_eq!(api.calls(), vec![Call::UseToken("stale".to_string())]);
        assert_eq!(prompter.remaining(), 2);
    }

    #[tokio::test]
    async fn test_missing_token_file_is_io_error() {
        let mut api = FakeController::default();
        let source = CredentialSource::TokenFile(PathBuf::from("/nonexistent/cg-token.txt"));
        let result = authenticate(&mut api, &source, &mut ScriptedPrompter::default()).await;
        assert!(matches!(result, Err(AppError::Io(_))));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_interactive_login_retries_until_accepted() {
        let mut api = FakeController {
            valid_logins: vec![("ops@example.com".to_string(), "right".to_string())],
            ..Default::default()
        };
        let mut prompter =
            ScriptedPrompter::new(["ops@example.com", "wrong", "ops@example.com ", "right"]);

        let session = authenticate(&mut api, &CredentialSource::Interactive, &mut prompter)
            .await
            .unwrap();

        assert_eq!(session.tenant_id, "tenant-1");
        assert_eq!(
            api.calls(),
            vec![
                Call::Login("ops@example.com".to_string()),
                Call::Login("ops@example.com".to_string()),
            ]
        );
        assert_eq!(prompter.asked(), ["Email: ", "Password: ", "Email: ", "Password: "]);
    }

    #[tokio::test]
    async fn test_interactive_login_stops_when_input_closes() {
        let mut api = FakeController::default();
        let mut prompter = ScriptedPrompter::new(["ops@example.com", "wrong"]);
        let result = authenticate(&mut api, &CredentialSource::Interactive, &mut prompter).await;
        assert!(matches!(result, Err(AppError::InputClosed)));
    }
}
