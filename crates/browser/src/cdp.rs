//! Remote-debugging helpers: cookie injection over the session's CDP
//! connection.

use chromiumoxide::cdp::browser_protocol::network::{EnableParams, SetCookieParams};

use pharos_audit::config::SessionCookie;

use crate::{error::BrowserError, launcher::ChromeSession};

/// Set `cookie` scoped to `url` on the browser profile, before any
/// navigation. Runs on a blank page; the cookie is profile-wide, so the audit
/// page sees it.
pub async fn inject_cookie(
    session: &ChromeSession,
    cookie: &SessionCookie,
    url: &str,
) -> Result<(), BrowserError> {
    let page = session.new_page("about:blank").await?;

    page.execute(EnableParams::default()).await?;

    let params = SetCookieParams::builder()
        .name(&cookie.name)
        .value(&cookie.value)
        .url(url)
        .build()
        .map_err(BrowserError::Cdp)?;
    page.execute(params).await?;

    page.close().await?;
    Ok(())
}
