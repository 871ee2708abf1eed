//! Git authentication for fetch and push
//!
//! With an access token, HTTPS remotes authenticate as `x-access-token`.
//! Without one, authentication is delegated to git's native system:
//! - SSH agent, then SSH keys from ~/.ssh/
//! - Git credential helpers

use git2::{Cred, CredentialType, Error, ErrorClass, ErrorCode, RemoteCallbacks};

const TOKEN_USERNAME: &str = "x-access-token";
const SSH_KEY_NAMES: [&str; 3] = ["id_ed25519", "id_rsa", "id_ecdsa"];

fn auth_failed(message: &str) -> Error {
    Error::new(ErrorCode::Auth, ErrorClass::Http, message)
}

fn ssh_key_from_home(username: &str) -> Result<Cred, Error> {
    let ssh_dir = dirs::home_dir().unwrap_or_default().join(".ssh");

    SSH_KEY_NAMES
        .iter()
        .map(|name| (ssh_dir.join(name), ssh_dir.join(format!("{name}.pub"))))
        .filter(|(private_key, _)| private_key.exists())
        .find_map(|(private_key, public_key)| {
            let public_key = public_key.exists().then_some(public_key.as_path());
            Cred::ssh_key(username, public_key, &private_key, None).ok()
        })
        .ok_or_else(|| auth_failed("SSH key not found"))
}

fn credential_helper(url: &str, username_from_url: Option<&str>) -> Result<Cred, Error> {
    let config = git2::Config::open_default().or_else(|_| git2::Config::new())?;
    Cred::credential_helper(&config, url, username_from_url)
}

fn credentials(
    token: Option<&str>,
    url: &str,
    username_from_url: Option<&str>,
    allowed_types: CredentialType,
) -> Result<Cred, Error> {
    if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
        if let Some(token) = token {
            return Cred::userpass_plaintext(TOKEN_USERNAME, token);
        }
        return credential_helper(url, username_from_url);
    }

    if allowed_types.contains(CredentialType::SSH_KEY) {
        let username = username_from_url.unwrap_or("git");
        return Cred::ssh_key_from_agent(username).or_else(|_| ssh_key_from_home(username));
    }

    if allowed_types.contains(CredentialType::DEFAULT) {
        return Cred::default();
    }

    Err(auth_failed("authentication failed"))
}

/// Remote callbacks that answer credential requests
pub fn remote_callbacks(token: Option<&str>) -> RemoteCallbacks<'_> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(move |url, username_from_url, allowed_types| {
        credentials(token, url, username_from_url, allowed_types)
    });
    callbacks
}
