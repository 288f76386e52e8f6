//! Generated diagnostic page served by the preview launcher.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filename the diagnostic page is written under.
pub const PREVIEW_PAGE: &str = "preview.html";

/// Inline script that probes `/.env` and reports a rough configured /
/// not-configured badge by substring match. Only embedded when the
/// operator opted into exposing dotfiles.
const ENV_PROBE_SCRIPT: &str = r#"<script>
    fetch('/.env')
      .then((response) => response.text())
      .then((text) => {
        const configured = text.includes('sk-');
        document.getElementById('api-status').textContent =
          configured ? 'API key configured' : 'API key not configured';
      })
      .catch(() => {
        document.getElementById('api-status').textContent = 'Could not read .env';
      });
  </script>"#;

/// Render the diagnostic document.
pub fn preview_document(expose_env: bool) -> String {
    let (api_status, probe_script) = if expose_env {
        ("Checking...", ENV_PROBE_SCRIPT)
    } else {
        ("Probe disabled (run with --expose-env to check)", "")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Preview Environment</title>
  <script src="https://unpkg.com/react@18/umd/react.development.js"></script>
  <script src="https://unpkg.com/react-dom@18/umd/react-dom.development.js"></script>
  <style>
    body {{ font-family: system-ui, sans-serif; max-width: 800px; margin: 2rem auto; padding: 0 1rem; background: #f5f5f5; }}
    .card {{ background: white; padding: 2rem; border-radius: 0.5rem; box-shadow: 0 2px 10px rgba(0, 0, 0, 0.1); }}
    .status {{ padding: 1rem; margin: 1rem 0; border-radius: 0.25rem; }}
    .ok {{ background: #d4edda; color: #155724; }}
    .info {{ background: #d1ecf1; color: #0c5460; }}
    button {{ padding: 0.5rem 1.25rem; border: none; border-radius: 0.25rem; cursor: pointer; background: #007bff; color: white; }}
  </style>
</head>
<body>
  <div class="card">
    <h1>Local preview environment</h1>
    <p>Quick test page; the full application still needs a build.</p>

    <div class="status ok">
      <strong>Server running.</strong> Static files in this directory are reachable.
    </div>

    <div class="status info">
      <strong>API key:</strong> <span id="api-status">{api_status}</span>
    </div>

    <h2>What works here</h2>
    <ul>
      <li>Static file access, with CORS headers on every response</li>
      <li>Extensionless paths fall back to the root document</li>
      <li>React UMD builds are loaded for in-page experiments</li>
    </ul>

    <button onclick="location.reload()">Reload</button>
  </div>
  {probe_script}
</body>
</html>
"#
    )
}

/// Write the diagnostic page into `dir`, replacing any previous copy.
pub fn write_preview_page(dir: &Path, expose_env: bool) -> io::Result<PathBuf> {
    let path = dir.join(PREVIEW_PAGE);
    fs::write(&path, preview_document(expose_env))?;
    Ok(path)
}
