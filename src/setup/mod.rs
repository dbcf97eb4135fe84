//! First-run "choose your server" page and the intents it raises.
//!
//! The page talks back to the shell by navigating to `stoat-intent:` URIs,
//! which the navigation hook cancels and dispatches.

use url::Url;

pub const INTENT_SCHEME: &str = "stoat-intent";
pub const SETUP_PAGE_URI: &str = "about:blank";
pub const INVALID_SERVER_MESSAGE: &str =
    "Please enter a valid URL (example: https://stoat.example.com).";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupIntent {
    /// Store the given server and connect to it.
    SetServer(String),
    /// Resolve again and connect, or stay on the setup page.
    Connect,
    /// Forget the stored server and load the public one without storing it.
    ConnectDefault,
    /// Store the public server and load it.
    UsePublic,
}

impl SetupIntent {
    /// Parses a bridge URI. Anything outside the intent scheme is `None`.
    pub fn from_bridge_uri(uri: &str) -> Option<Self> {
        let url = Url::parse(uri).ok()?;
        if url.scheme() != INTENT_SCHEME {
            return None;
        }

        match url.path() {
            "set-server" => {
                let server = url
                    .query_pairs()
                    .find(|(key, _)| key == "url")
                    .map(|(_, value)| value.into_owned())
                    .unwrap_or_default();
                Some(Self::SetServer(server))
            }
            "connect" => Some(Self::Connect),
            "connect-default" => Some(Self::ConnectDefault),
            "use-public" => Some(Self::UsePublic),
            other => {
                tracing::debug!(intent = other, "unknown setup intent");
                None
            }
        }
    }

    pub fn is_bridge_uri(uri: &str) -> bool {
        Url::parse(uri).is_ok_and(|url| url.scheme() == INTENT_SCHEME)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SetServer(_) => "set-server",
            Self::Connect => "connect",
            Self::ConnectDefault => "connect-default",
            Self::UsePublic => "use-public",
        }
    }
}

/// Setup page state: what the user typed and the inline error, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupView {
    pub server_input: String,
    pub error: Option<String>,
}

impl SetupView {
    pub fn with_error(server_input: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            server_input: server_input.into(),
            error: Some(error.into()),
        }
    }

    /// Fills the template slots in one pass, so substituted text is never rescanned.
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(SETUP_TEMPLATE.len() + self.server_input.len());
        let mut rest = SETUP_TEMPLATE;
        while let Some(start) = rest.find("{{") {
            html.push_str(&rest[..start]);
            let slot = &rest[start + 2..];
            let Some(end) = slot.find("}}") else {
                rest = &rest[start..];
                break;
            };
            match &slot[..end] {
                "SERVER_VALUE" => html.push_str(&escape_html(&self.server_input)),
                "ERROR" => {
                    if let Some(error) = self.error.as_deref() {
                        html.push_str(&escape_html(error));
                    }
                }
                "SCHEME" => html.push_str(INTENT_SCHEME),
                other => {
                    html.push_str("{{");
                    html.push_str(other);
                    html.push_str("}}");
                }
            }
            rest = &slot[end + 2..];
        }
        html.push_str(rest);
        html
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const SETUP_TEMPLATE: &str = r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Stoat</title>
  <style>
    html, body { height: 100%; margin: 0; font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif; }
    body { display: grid; place-items: center; background: #0b0d12; color: #fff; }
    .card {
      width: 420px; max-width: calc(100vw - 48px); box-sizing: border-box;
      padding: 28px; border-radius: 24px; text-align: center;
      background: rgba(25, 27, 35, .9); border: 1px solid rgba(255, 255, 255, .06);
      box-shadow: 0 24px 72px rgba(0, 0, 0, .55);
    }
    h1 { font-size: 22px; margin: 8px 0 0; }
    p { margin: 10px 0 0; color: rgba(255, 255, 255, .65); line-height: 1.4; }
    input {
      margin-top: 24px; width: 100%; height: 48px; box-sizing: border-box;
      padding: 0 14px; border-radius: 999px; outline: none; color: #fff;
      border: 1px solid rgba(255, 255, 255, .1); background: rgba(0, 0, 0, .25);
    }
    .error { margin-top: 10px; min-height: 18px; font-size: 13px; color: #ffb3b3; }
    button {
      margin-top: 6px; width: 100%; padding: 12px 14px; border-radius: 999px;
      border: none; font-weight: 700; cursor: pointer;
    }
    .primary { background: #b9c6ff; color: #0b0d12; }
    .secondary { margin-top: 10px; color: #fff; background: rgba(255, 255, 255, .06); border: 1px solid rgba(255, 255, 255, .1); }
    .hint { margin-top: 12px; font-size: 12px; color: rgba(255, 255, 255, .55); }
  </style>
</head>
<body>
  <form class="card" id="setup">
    <h1>Where are you going?</h1>
    <p>Enter your community's Stoat server to continue.</p>
    <input id="server" placeholder="https://stoat.yourserver.com" value="{{SERVER_VALUE}}" autofocus />
    <div class="error" id="error">{{ERROR}}</div>
    <button class="primary" type="submit">Continue</button>
    <button class="secondary" type="button" id="use-public">Use Stoat Official</button>
    <div class="hint">Don't have a server? Use the official one.</div>
  </form>
<script>
  function send(intent, query) {
    window.location.href = "{{SCHEME}}:" + intent + (query ? "?" + query : "");
  }
  document.getElementById("setup").addEventListener("submit", function (event) {
    event.preventDefault();
    document.getElementById("error").textContent = "";
    var server = (document.getElementById("server").value || "").trim();
    send("set-server", "url=" + encodeURIComponent(server));
  });
  document.getElementById("use-public").addEventListener("click", function () {
    document.getElementById("error").textContent = "";
    send("use-public");
  });
</script>
</body>
</html>
"#;
