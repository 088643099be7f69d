use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http_client::Request;

/// User agent sent with every request
const USER_AGENT: &str = concat!("artist-stats/", env!("CARGO_PKG_VERSION"));

/// Add headers shared by every request
pub fn add_common_headers(request: &mut Request) {
    let _ = request.insert_header("User-Agent", USER_AGENT);
    let _ = request.insert_header("Accept", "application/json");
}

/// Add headers for an authenticated Web API GET request
pub fn add_api_headers(request: &mut Request, access_token: &str) {
    add_common_headers(request);
    let _ = request.insert_header("Authorization", format!("Bearer {access_token}"));
}

/// Add headers for the client-credentials token request
pub fn add_token_headers(request: &mut Request, client_id: &str, client_secret: &str) {
    add_common_headers(request);
    let _ = request.insert_header(
        "Authorization",
        basic_auth_value(client_id, client_secret),
    );
    let _ = request.insert_header("Content-Type", "application/x-www-form-urlencoded");
}

/// `Basic <base64(id:secret)>`
pub fn basic_auth_value(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{client_id}:{client_secret}"))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_encodes_pair() {
        assert_eq!(basic_auth_value("id", "secret"), "Basic aWQ6c2VjcmV0");
    }
}
