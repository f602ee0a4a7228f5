//! Scripted pointer sessions.
//!
//! One JSON value per line: an input event (`{"press":{"x":0,"y":0}}`,
//! `{"move":{...}}`, `{"release":{...}}`, `"spin"`) or a pause
//! (`{"wait":700}`, milliseconds). Blank lines and `#` comments are skipped.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use cube_session::{CubeConfig, CubeSession, InputEvent, Presenter, SessionHandle, SessionSummary};
use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

#[derive(Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptStep {
    Wait { wait: u64 },
    Event(InputEvent),
}

/// Parse one script line. `None` for blanks and comments.
pub fn parse_line(line: &str) -> Result<Option<ScriptStep>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let step = serde_json::from_str(trimmed)
        .with_context(|| format!("invalid script line: {trimmed}"))?;
    Ok(Some(step))
}

async fn open_script(path: &Path) -> Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(tokio::io::stdin())));
    }
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("failed to open {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Replay `path` through a live session and return its summary once every
/// started flow has settled.
pub async fn run<P: Presenter>(
    config: &CubeConfig,
    presenter: P,
    path: &Path,
) -> Result<SessionSummary> {
    let session = CubeSession::new(config, presenter).context("failed to start session")?;
    let (handle, task) = session.spawn();
    let mut lines = open_script(path).await?.lines();

    let fed = tokio::select! {
        fed = feed(&handle, &mut lines) => fed,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted, tearing down session");
            handle.shutdown().await.ok();
            Ok(())
        }
    };
    if let Err(e) = fed {
        handle.shutdown().await.ok();
        task.await.ok();
        return Err(e);
    }

    handle.drain().await.ok();
    let summary = task.await.context("session task failed")?;
    Ok(summary)
}

async fn feed<R>(handle: &SessionHandle, lines: &mut tokio::io::Lines<R>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut line_no = 0usize;
    while let Some(line) = lines.next_line().await.context("failed to read script")? {
        line_no += 1;
        let step = parse_line(&line).with_context(|| format!("line {line_no}"))?;
        match step {
            None => {}
            Some(ScriptStep::Wait { wait }) => {
                tokio::time::sleep(Duration::from_millis(wait)).await;
            }
            Some(ScriptStep::Event(event)) => {
                tracing::trace!(?event, "script event");
                handle.send(event).await.context("session closed early")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube_core::Point;

    #[test]
    fn test_parse_events() {
        assert_eq!(
            parse_line(r#"{"press":{"x":1,"y":2}}"#).unwrap(),
            Some(ScriptStep::Event(InputEvent::Press(Point::new(1.0, 2.0))))
        );
        assert_eq!(
            parse_line(r#" {"move": {"x": -3.5, "y": 0}} "#).unwrap(),
            Some(ScriptStep::Event(InputEvent::Move(Point::new(-3.5, 0.0))))
        );
        assert_eq!(
            parse_line(r#""spin""#).unwrap(),
            Some(ScriptStep::Event(InputEvent::Spin))
        );
    }

    #[test]
    fn test_parse_wait() {
        assert_eq!(
            parse_line(r#"{"wait": 700}"#).unwrap(),
            Some(ScriptStep::Wait { wait: 700 })
        );
    }

    #[test]
    fn test_skip_blank_and_comments() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   # drag left").unwrap(), None);
    }

    #[test]
    fn test_reject_garbage() {
        assert!(parse_line(r#"{"tap":{"x":1}}"#).is_err());
        assert!(parse_line("press 1 2").is_err());
    }

    #[test]
    fn test_lifecycle_commands_not_scriptable() {
        assert!(parse_line(r#""drain""#).is_err());
        assert!(parse_line(r#""shutdown""#).is_err());
    }
}
