//! Landing page served on `GET /`.

use axum::response::Html;

const WELCOME_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>AI Proxy</title>
    <style>
      body {
        margin: 0;
        min-height: 100vh;
        display: flex;
        align-items: center;
        justify-content: center;
        font-family: system-ui, sans-serif;
        background: #1f2430;
        color: #e6e6e6;
      }
      main {
        padding: 2rem 3rem;
        border-radius: 12px;
        background: #2a3040;
        text-align: center;
      }
      code {
        color: #ffd86b;
      }
    </style>
  </head>
  <body>
    <main>
      <h1>AI Proxy</h1>
      <p>One origin for many AI provider APIs.</p>
      <p>Send requests to <code>/{provider}/...</code>, for example <code>/openai/v1/models</code>.</p>
    </main>
  </body>
</html>
"#;

pub async fn welcome() -> Html<&'static str> {
    Html(WELCOME_PAGE)
}
