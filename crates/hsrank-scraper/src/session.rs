//! Headless-browser session: driver construction and the login state machine.
//!
//! Login walks `Init → MainPageLoaded → LoginFormVisible → Submitted →
//! {SessionPopupHandled | NoPopup} → LoginConfirmed | LoginFailed`. Every
//! wait is bounded; exceeding a bound is a [`ScrapeError::Timeout`]. The
//! whole attempt is wrapped in [`crate::retry::retry_with_backoff`], with
//! cookies cleared before each re-try.

use std::time::{Duration, Instant};

use thirtyfour::prelude::*;
use thirtyfour::ChromeCapabilities;

use hsrank_core::AppConfig;

use crate::artifacts::save_debug;
use crate::error::ScrapeError;
use crate::retry::retry_with_backoff;

/// Path marker of the sign-in page.
const SIGN_IN_PATH: &str = "/user/sign_in";
/// Link/button label that enters and submits the login flow.
const LOGIN_LABEL: &str = "로그인";
/// Button label that terminates the oldest session and continues.
const TERMINATE_AND_CONTINUE: &str = "종료 후 접속";

/// Builds a headless Chrome session against the configured WebDriver endpoint.
///
/// # Errors
///
/// Returns [`ScrapeError::WebDriver`] if the session cannot be created.
pub async fn build_driver(config: &AppConfig) -> Result<WebDriver, ScrapeError> {
    let mut caps: ChromeCapabilities = DesiredCapabilities::chrome();
    for arg in [
        "--headless=new",
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--disable-gpu",
        "--window-size=1920,1080",
        "--lang=ko-KR",
        "user-agent=Mozilla/5.0 Chrome/122.0.0.0 Safari/537.36",
    ] {
        caps.add_arg(arg)?;
    }
    let driver = WebDriver::new(&config.webdriver_url, caps).await?;
    driver.set_page_load_timeout(Duration::from_secs(60)).await?;
    Ok(driver)
}

/// Logs into the ranking site, retrying the whole attempt a bounded number
/// of times with cookies cleared between attempts.
///
/// # Errors
///
/// Returns [`ScrapeError::AttemptsExhausted`] wrapping the last attempt's
/// error once all attempts fail.
pub async fn login_with_retries(driver: &WebDriver, config: &AppConfig) -> Result<(), ScrapeError> {
    retry_with_backoff(
        config.login_max_attempts,
        config.login_backoff_base_ms,
        |attempt| async move {
            if attempt > 1 {
                if let Err(e) = driver.delete_all_cookies().await {
                    tracing::warn!(error = %e, "cookie reset before retry failed");
                }
            }
            login_once(driver, config).await
        },
    )
    .await
}

/// One pass of the login state machine. Any UI-state failure captures a
/// screenshot and page source before the error propagates to the retry loop.
async fn login_once(driver: &WebDriver, config: &AppConfig) -> Result<(), ScrapeError> {
    let result = login_attempt(driver, config).await;
    if let Err(e) = &result {
        if e.is_ui_failure() {
            save_debug(driver, &config.artifact_dir, "login_fail").await;
        }
    }
    result
}

async fn login_attempt(driver: &WebDriver, config: &AppConfig) -> Result<(), ScrapeError> {
    let wait = Duration::from_secs(config.element_wait_secs);

    driver.goto(&config.site_base_url).await?;
    tracing::info!(url = %config.site_base_url, "main page loaded");

    let login_link = wait_for_clickable(driver, By::LinkText(LOGIN_LABEL), wait).await?;
    js_click(driver, &login_link).await?;
    tracing::info!("login link clicked");

    wait_for_sign_in_path(driver, wait).await?;
    tokio::time::sleep(Duration::from_secs(1)).await;

    // Duplicate hidden form instances exist in the DOM; only the displayed
    // inputs accept keys.
    let email_input = first_displayed(driver, "input[name='email']").await?;
    let password_input = first_displayed(driver, "input[name='password']").await?;
    email_input.clear().await?;
    email_input.send_keys(&config.ecomm_email).await?;
    password_input.clear().await?;
    password_input.send_keys(&config.ecomm_password).await?;
    tokio::time::sleep(Duration::from_millis(500)).await;

    // Scripted click bypasses overlay interception on the submit button.
    let form = driver.find(By::Tag("form")).await?;
    let submit = form
        .find(By::XPath(
            format!(".//button[contains(text(), '{LOGIN_LABEL}')]").as_str(),
        ))
        .await?;
    js_click(driver, &submit).await?;
    tracing::info!("credentials submitted");

    tokio::time::sleep(Duration::from_secs(2)).await;
    handle_session_popup(driver).await;

    tokio::time::sleep(Duration::from_secs(2)).await;
    confirm_login(driver).await
}

/// Resolves the concurrent-session popup when present.
///
/// Selects the last (oldest, bottom) listed session and clicks the
/// terminate-and-continue button if it is present and enabled. An absent
/// popup is the normal no-conflict branch, never an error; unexpected
/// failures while dismissing it are logged and swallowed so the success
/// judgement that follows decides the outcome.
async fn handle_session_popup(driver: &WebDriver) {
    let items = match driver.find_all(By::Css("ul > li")).await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(error = %e, "session popup lookup failed (ignored)");
            return;
        }
    };
    let mut visible = Vec::new();
    for item in items {
        if item.is_displayed().await.unwrap_or(false) {
            visible.push(item);
        }
    }
    let Some(last) = visible.last() else {
        tracing::info!("no session-conflict popup");
        return;
    };

    tracing::info!(sessions = visible.len(), "session limit reached, terminating oldest");
    if let Err(e) = last.click().await {
        tracing::warn!(error = %e, "session entry click failed (ignored)");
        return;
    }
    tokio::time::sleep(Duration::from_secs(1)).await;

    let button = match driver
        .find(By::XPath(
            format!("//button[text()='{TERMINATE_AND_CONTINUE}']").as_str(),
        ))
        .await
    {
        Ok(button) => button,
        Err(e) => {
            tracing::warn!(error = %e, "terminate-and-continue button not found (ignored)");
            return;
        }
    };
    if button.is_enabled().await.unwrap_or(false) {
        if let Err(e) = js_click(driver, &button).await {
            tracing::warn!(error = %e, "terminate-and-continue click failed (ignored)");
            return;
        }
        tracing::info!("terminate-and-continue clicked");
        tokio::time::sleep(Duration::from_secs(2)).await;
    }
}

/// Terminal judgement: logged in iff we are off the sign-in path or no
/// credential email field is still displayed.
async fn confirm_login(driver: &WebDriver) -> Result<(), ScrapeError> {
    let url = driver.current_url().await?;
    let mut email_visible = false;
    for input in driver.find_all(By::Css("input[name='email']")).await? {
        if input.is_displayed().await.unwrap_or(false) {
            email_visible = true;
            break;
        }
    }
    if url.path().contains("/sign_in") && email_visible {
        tracing::error!(url = %url, "login rejected, credential form still visible");
        return Err(ScrapeError::LoginRejected {
            url: url.to_string(),
        });
    }
    tracing::info!(url = %url, "login confirmed");
    Ok(())
}

/// Polls `current_url` until it lands on the sign-in path.
async fn wait_for_sign_in_path(driver: &WebDriver, wait: Duration) -> Result<(), ScrapeError> {
    let started = Instant::now();
    loop {
        let url = driver.current_url().await?;
        if url.path().contains(SIGN_IN_PATH) {
            tracing::info!(url = %url, "sign-in page reached");
            return Ok(());
        }
        if started.elapsed() > wait {
            return Err(ScrapeError::Timeout {
                what: "sign-in page".to_owned(),
                waited_secs: wait.as_secs(),
            });
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
}

/// Waits for an element matching `by` to be displayed and enabled.
async fn wait_for_clickable(
    driver: &WebDriver,
    by: By,
    wait: Duration,
) -> Result<WebElement, ScrapeError> {
    let started = Instant::now();
    let description = format!("{by:?}");
    loop {
        if let Ok(elem) = driver.find(by.clone()).await {
            let displayed = elem.is_displayed().await.unwrap_or(false);
            let enabled = elem.is_enabled().await.unwrap_or(false);
            if displayed && enabled {
                return Ok(elem);
            }
        }
        if started.elapsed() > wait {
            return Err(ScrapeError::Timeout {
                what: description,
                waited_secs: wait.as_secs(),
            });
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
}

/// First displayed element for a CSS selector.
async fn first_displayed(driver: &WebDriver, css: &str) -> Result<WebElement, ScrapeError> {
    for elem in driver.find_all(By::Css(css)).await? {
        if elem.is_displayed().await.unwrap_or(false) {
            return Ok(elem);
        }
    }
    Err(ScrapeError::MissingElement {
        what: css.to_owned(),
    })
}

/// Dispatches a scripted click, bypassing overlay interception.
async fn js_click(driver: &WebDriver, elem: &WebElement) -> Result<(), ScrapeError> {
    driver
        .execute("arguments[0].click();", vec![elem.to_json()?])
        .await?;
    Ok(())
}
