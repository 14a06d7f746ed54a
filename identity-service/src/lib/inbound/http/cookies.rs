use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Build a session cookie. Both token cookies are HttpOnly and Secure.
fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(true)
        .path("/")
        .build()
}

/// Attach both token cookies to the jar.
pub fn with_session_cookies(
    jar: CookieJar,
    access_token: String,
    refresh_token: String,
) -> CookieJar {
    jar.add(session_cookie(ACCESS_TOKEN_COOKIE, access_token))
        .add(session_cookie(REFRESH_TOKEN_COOKIE, refresh_token))
}

/// Expire both token cookies.
pub fn without_session_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(session_cookie(ACCESS_TOKEN_COOKIE, String::new()))
        .remove(session_cookie(REFRESH_TOKEN_COOKIE, String::new()))
}
