//! Prober invocation - runs ffprobe and captures what it prints

use crate::error::{ExtractionError, ExtractionResult};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Fixed ffprobe flags: quiet diagnostics, JSON output, container and stream sections.
pub const FFPROBE_ARGS: [&str; 6] = [
    "-v",
    "quiet",
    "-print_format",
    "json",
    "-show_format",
    "-show_streams",
];

/// A media prober that describes a file as raw text.
///
/// Implementations must be safe to share across request handlers.
#[async_trait]
pub trait MediaProber: Send + Sync {
    /// Human-readable name identifying this prober implementation.
    fn name(&self) -> &'static str;

    /// Probe the file at `path` and return everything the tool printed.
    ///
    /// Fails with [`ExtractionError::NotFound`] when the file does not exist,
    /// without starting the tool.
    async fn probe(&self, path: &Path) -> ExtractionResult<String>;
}

/// Validate that a path doesn't contain shell metacharacters or dangerous sequences
fn validate_path(path: &str) -> ExtractionResult<()> {
    let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if path.chars().any(|c| dangerous_chars.contains(&c)) {
        return Err(ExtractionError::InvalidConfiguration(format!(
            "Path contains dangerous characters: {}",
            path
        )));
    }

    if path.contains("..") {
        return Err(ExtractionError::InvalidConfiguration(format!(
            "Path contains directory traversal: {}",
            path
        )));
    }

    Ok(())
}

/// Process-backed prober running the ffprobe executable.
#[derive(Debug, Clone)]
pub struct FfprobeRunner {
    ffprobe_path: String,
}

impl FfprobeRunner {
    pub fn new(ffprobe_path: impl Into<String>) -> ExtractionResult<Self> {
        let ffprobe_path = ffprobe_path.into();
        if ffprobe_path.trim().is_empty() {
            return Err(ExtractionError::InvalidConfiguration(
                "ffprobe path is empty".to_string(),
            ));
        }
        validate_path(&ffprobe_path)?;

        Ok(Self { ffprobe_path })
    }

    pub fn ffprobe_path(&self) -> &str {
        &self.ffprobe_path
    }
}

/// Read a stream to the end, joining its lines with the terminators dropped.
async fn collect_lines<R>(reader: R) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut output = String::new();
    while let Some(line) = lines.next_line().await? {
        output.push_str(&line);
    }
    Ok(output)
}

#[async_trait]
impl MediaProber for FfprobeRunner {
    fn name(&self) -> &'static str {
        "ffprobe"
    }

    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn probe(&self, path: &Path) -> ExtractionResult<String> {
        match tokio::fs::metadata(path).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ExtractionError::NotFound(path.display().to_string()));
            }
            Err(e) => {
                return Err(ExtractionError::ExtractionFailed(format!(
                    "cannot stat {}: {}",
                    path.display(),
                    e
                )));
            }
        }

        let start = std::time::Instant::now();

        let mut child = Command::new(&self.ffprobe_path)
            .args(FFPROBE_ARGS)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExtractionError::ExtractionFailed(e.to_string()))?;

        let stdout = child.stdout.take().ok_or_else(|| {
            ExtractionError::ExtractionFailed("ffprobe stdout was not captured".to_string())
        })?;
        let stderr = child.stderr.take().ok_or_else(|| {
            ExtractionError::ExtractionFailed("ffprobe stderr was not captured".to_string())
        })?;

        // Both pipes are drained together so a chatty stderr cannot stall stdout.
        let (out, err) = tokio::try_join!(collect_lines(stdout), collect_lines(stderr))
            .map_err(|e| ExtractionError::ExtractionFailed(e.to_string()))?;

        // Reap the child; its exit status is not part of the contract.
        if let Err(e) = child.wait().await {
            tracing::debug!(error = %e, "Failed to wait for ffprobe to exit");
        }

        let mut output = out;
        output.push_str(&err);

        tracing::info!(
            duration_ms = start.elapsed().as_millis(),
            output_len = output.len(),
            "Probe completed"
        );

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_dangerous_characters() {
        for path in ["ffprobe; rm -rf /", "ffprobe | cat", "$(ffprobe)", "../bin/ffprobe"] {
            let result = FfprobeRunner::new(path);
            assert!(
                matches!(result, Err(ExtractionError::InvalidConfiguration(_))),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn test_new_rejects_empty_path() {
        assert!(FfprobeRunner::new("").is_err());
    }

    #[test]
    fn test_new_accepts_plain_paths() {
        let runner = FfprobeRunner::new("/usr/local/bin/ffprobe").unwrap();
        assert_eq!(runner.ffprobe_path(), "/usr/local/bin/ffprobe");
        assert_eq!(runner.name(), "ffprobe");
        assert!(FfprobeRunner::new("ffprobe").is_ok());
    }

    #[tokio::test]
    async fn test_probe_missing_file_is_not_found() {
        let runner = FfprobeRunner::new("ffprobe").unwrap();
        let result = runner.probe(Path::new("/definitely/not/here.mp4")).await;
        match result {
            Err(ExtractionError::NotFound(path)) => assert!(path.contains("here.mp4")),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_probe_unreadable_path_is_not_reported_missing() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("clip.mp4");
        std::fs::write(&video, b"data").unwrap();
        let runner = FfprobeRunner::new("ffprobe").unwrap();

        // A regular file used as a directory fails to stat with something other than NotFound.
        let result = runner.probe(&video.join("inner.mp4")).await;
        assert!(
            matches!(result, Err(ExtractionError::ExtractionFailed(_))),
            "Expected ExtractionFailed, got {:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_probe_missing_executable_is_extraction_failure() {
        let dir = tempfile::tempdir().unwrap();
        let video = dir.path().join("clip.mp4");
        std::fs::write(&video, b"not really a video").unwrap();

        let missing = dir.path().join("no-such-ffprobe");
        let runner = FfprobeRunner::new(missing.to_string_lossy().to_string()).unwrap();

        let result = runner.probe(&video).await;
        assert!(matches!(result, Err(ExtractionError::ExtractionFailed(_))));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        fn write_script(dir: &Path, name: &str, body: &str) -> String {
            let path = dir.join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path.to_string_lossy().to_string()
        }

        #[tokio::test]
        async fn test_probe_joins_lines_and_passes_fixed_args() {
            let dir = tempfile::tempdir().unwrap();
            let video = dir.path().join("clip.mp4");
            std::fs::write(&video, b"data").unwrap();
            let script = write_script(
                dir.path(),
                "fake-ffprobe",
                "printf '{\\n  \"args\": \"%s\"\\r\\n}\\n' \"$*\"",
            );

            let runner = FfprobeRunner::new(script).unwrap();
            let output = runner.probe(&video).await.unwrap();

            let expected_args = format!(
                "-v quiet -print_format json -show_format -show_streams {}",
                video.display()
            );
            assert_eq!(output, format!("{{  \"args\": \"{}\"}}", expected_args));
        }

        #[tokio::test]
        async fn test_probe_appends_stderr_and_ignores_exit_status() {
            let dir = tempfile::tempdir().unwrap();
            let video = dir.path().join("clip.mov");
            std::fs::write(&video, b"data").unwrap();
            let script = write_script(
                dir.path(),
                "failing-ffprobe",
                "echo '{}'\necho 'warning' >&2\nexit 3",
            );

            let runner = FfprobeRunner::new(script).unwrap();
            let output = runner.probe(&video).await.unwrap();
            assert_eq!(output, "{}warning");
        }
    }
}
