//! Playwright-driven page object for the upload flow

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;
use tokio::process::Command as TokioCommand;
use tracing::{debug, warn};

use crate::error::{E2eError, E2eResult};
use crate::outcome::UploadResult;

/// CSS selector for the file input on the upload page.
const FILE_INPUT_SELECTOR: &str = "input[type='file']";

/// Locator for the control that triggers processing.
const UPLOAD_BUTTON_SELECTOR: &str = "text=Upload";

/// Container the application fills with the JSON outcome.
const RESULTS_SELECTOR: &str = "#results";

/// How long to wait for the result container before giving up.
const RESULTS_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, Default)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

/// Configuration for the upload page.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub base_url: String,
    pub browser: Browser,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            browser: Browser::Chromium,
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

/// One queued page interaction.
#[derive(Debug, Clone)]
enum PageStep {
    Navigate { url: String },
    UploadFile { path: PathBuf },
    Submit,
}

/// Envelope the generated script prints as its last stdout line.
#[derive(Debug, Deserialize)]
struct ScriptEnvelope {
    ok: bool,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    timeout: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Page object for the CSV upload page.
///
/// Interactions are queued and executed in one browser session when
/// [`get_results`](UploadPage::get_results) runs, so the page state carries
/// from navigation through submission to reading the outcome.
pub struct UploadPage {
    config: PageConfig,
    steps: Vec<PageStep>,
}

impl UploadPage {
    pub fn new(config: PageConfig) -> E2eResult<Self> {
        Self::check_playwright_installed()?;

        Ok(Self {
            config,
            steps: Vec::new(),
        })
    }

    /// Check if Playwright is installed
    fn check_playwright_installed() -> E2eResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    /// Queue navigation to the given URL.
    pub fn navigate(&mut self, url: &str) {
        debug!(url, "queueing navigation");
        self.steps.push(PageStep::Navigate { url: url.to_string() });
    }

    /// Queue setting the file input to the given CSV.
    pub fn upload_file(&mut self, path: &Path) {
        debug!(path = %path.display(), "queueing file upload");
        self.steps.push(PageStep::UploadFile { path: path.to_path_buf() });
    }

    /// Queue clicking the Upload control.
    pub fn submit(&mut self) {
        debug!("queueing submit");
        self.steps.push(PageStep::Submit);
    }

    /// Run the queued steps in one browser session, wait for the result
    /// container, and return its parsed content.
    ///
    /// Browser-side failures never escape this boundary: a result container
    /// that does not appear within the 10-second wait maps to the
    /// synthetic timeout result, and any other failure (element missing,
    /// text that is not valid JSON) to a synthetic parse-failure result.
    /// Only a broken Playwright installation is surfaced as an error.
    pub async fn get_results(&mut self) -> E2eResult<UploadResult> {
        let script = self.build_script();
        let envelope = self.run_script(&script).await?;

        if envelope.ok {
            let text = envelope.text.unwrap_or_default();
            return Ok(match UploadResult::from_container_text(&text) {
                Ok(result) => result,
                Err(e) => {
                    warn!("result container held invalid JSON: {e}");
                    UploadResult::parse_failure(e)
                }
            });
        }

        if envelope.timeout {
            warn!(
                "'{}' did not appear within {} ms",
                RESULTS_SELECTOR, RESULTS_TIMEOUT_MS
            );
            return Ok(UploadResult::timeout());
        }

        let detail = envelope.error.unwrap_or_else(|| "unknown browser error".to_string());
        warn!("browser-side failure: {detail}");
        Ok(UploadResult::parse_failure(detail))
    }

    /// Build the Playwright script for the queued steps plus the result read.
    fn build_script(&self) -> String {
        let mut script = String::new();

        script.push_str(&format!(
            r#"const {{ chromium, firefox, webkit }} = require('playwright');

(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({{
    viewport: {{ width: {width}, height: {height} }}
  }});
  const page = await context.newPage();

  let awaitingResults = false;
  try {{
"#,
            browser = self.config.browser.as_str(),
            headless = self.config.headless,
            width = self.config.viewport_width,
            height = self.config.viewport_height,
        ));

        for step in &self.steps {
            script.push_str(&self.step_to_js(step));
            script.push('\n');
        }

        script.push_str(&format!(
            r#"
    awaitingResults = true;
    await page.waitForSelector({results}, {{ timeout: {timeout} }});
    const text = await page.innerText({results});
    console.log(JSON.stringify({{ ok: true, text }}));
  }} catch (error) {{
    const timeout = awaitingResults && error.name === 'TimeoutError';
    console.log(JSON.stringify({{ ok: false, timeout, error: error.message }}));
  }} finally {{
    await browser.close();
  }}
}})();
"#,
            results = js_string(RESULTS_SELECTOR),
            timeout = RESULTS_TIMEOUT_MS,
        ));

        script
    }

    /// Convert a queued step to JavaScript.
    fn step_to_js(&self, step: &PageStep) -> String {
        match step {
            PageStep::Navigate { url } => {
                format!("    await page.goto({});", js_string(url))
            }
            PageStep::UploadFile { path } => format!(
                "    await page.setInputFiles({}, {});",
                js_string(FILE_INPUT_SELECTOR),
                js_string(&path.to_string_lossy()),
            ),
            PageStep::Submit => {
                format!("    await page.click({});", js_string(UPLOAD_BUTTON_SELECTOR))
            }
        }
    }

    /// Execute the script via node and parse the result envelope.
    async fn run_script(&self, script: &str) -> E2eResult<ScriptEnvelope> {
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("upload.js");
        std::fs::write(&script_path, script)?;

        debug!("Running Playwright script: {}", script_path.display());

        let output = TokioCommand::new("node")
            .arg(&script_path)
            .current_dir(temp_dir.path())
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        // The envelope is the last stdout line; Playwright may chatter above it.
        if let Some(envelope) = stdout
            .lines()
            .rev()
            .find_map(|line| serde_json::from_str::<ScriptEnvelope>(line.trim()).ok())
        {
            return Ok(envelope);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(E2eError::Playwright(format!(
            "Script produced no result envelope:\nstdout: {}\nstderr: {}",
            stdout, stderr
        )))
    }
}

/// Quote a string as a JavaScript literal. JSON string syntax is valid JS,
/// which keeps selectors and filesystem paths safe to embed.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{value:?}"))
}
