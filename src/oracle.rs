//! The external sentiment oracle.
//!
//! The classifier never owns a model. It is handed something that implements
//! [`SentimentOracle`] and calls `predict` once per review. Loading and
//! sharing that model is the caller's business; the adapters here cover the
//! common shapes:
//!
//! - [`StaticOracle`]: a fixed answer (tests, dry runs).
//! - [`FnOracle`]: any closure.
//! - [`CommandOracle`]: an external program speaking a one-line protocol.
//! - [`Serialized`]: puts a non-reentrant oracle behind a mutex.
//! - [`Deadline`]: bounds a call in time; a timeout is reported as
//!   `OracleUnavailable`.

use crate::{ClassifyError, Polarity};
use std::io::{ErrorKind, Write};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex, mpsc};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// One answer from the oracle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: Polarity,
    /// Probability-like score in `[0, 1]`.
    pub confidence: f64,
}

impl Prediction {
    pub fn new(label: Polarity, confidence: f64) -> Self {
        Prediction { label, confidence }
    }

    /// Build a prediction from the raw tokens an external model reports.
    ///
    /// An unknown label means the model produced no label.
    pub fn from_raw(label: &str, confidence: f64) -> Result<Self, ClassifyError> {
        let label: Polarity = label.parse()?;
        Prediction::new(label, confidence).validated()
    }

    /// Reject confidences that are not finite or fall outside `[0, 1]`.
    pub fn validated(self) -> Result<Self, ClassifyError> {
        if self.confidence.is_finite() && (0.0..=1.0).contains(&self.confidence) {
            Ok(self)
        } else {
            Err(ClassifyError::unavailable(format!("oracle confidence {} outside [0, 1]", self.confidence)))
        }
    }
}

/// Contract of the external classifier.
///
/// Implementations may keep internal state; callers that share one instance
/// across threads must either pick a `Sync` implementation or wrap it in
/// [`Serialized`].
pub trait SentimentOracle {
    fn predict(&self, text: &str) -> Result<Prediction, ClassifyError>;
}

impl<T: SentimentOracle + ?Sized> SentimentOracle for &T {
    fn predict(&self, text: &str) -> Result<Prediction, ClassifyError> {
        (**self).predict(text)
    }
}

impl<T: SentimentOracle + ?Sized> SentimentOracle for Box<T> {
    fn predict(&self, text: &str) -> Result<Prediction, ClassifyError> {
        (**self).predict(text)
    }
}

impl<T: SentimentOracle + ?Sized> SentimentOracle for Arc<T> {
    fn predict(&self, text: &str) -> Result<Prediction, ClassifyError> {
        (**self).predict(text)
    }
}

// --- Adapters ----------------------------------------------------------------

/// Always answers with the same prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticOracle {
    prediction: Prediction,
}

impl StaticOracle {
    pub fn new(label: Polarity, confidence: f64) -> Self {
        StaticOracle { prediction: Prediction::new(label, confidence) }
    }
}

impl SentimentOracle for StaticOracle {
    fn predict(&self, _text: &str) -> Result<Prediction, ClassifyError> {
        Ok(self.prediction)
    }
}

/// Oracle backed by a closure.
pub struct FnOracle<F> {
    f: F,
}

impl<F> FnOracle<F>
where
    F: Fn(&str) -> Result<Prediction, ClassifyError>,
{
    pub fn new(f: F) -> Self {
        FnOracle { f }
    }
}

impl<F> SentimentOracle for FnOracle<F>
where
    F: Fn(&str) -> Result<Prediction, ClassifyError>,
{
    fn predict(&self, text: &str) -> Result<Prediction, ClassifyError> {
        (self.f)(text)
    }
}

impl<F> std::fmt::Debug for FnOracle<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnOracle").field("f", &"<function>").finish()
    }
}

/// Runs an external program per prediction.
///
/// The review text is written to the program's stdin. The program answers on
/// stdout with a label and a confidence separated by whitespace or a comma,
/// e.g. `positive 0.93`. A spawn failure, a non-zero exit or an unparsable
/// answer is reported as `OracleUnavailable`.
///
/// With [`CommandOracle::with_timeout`] set, a program still running at the
/// deadline is killed and reaped. Every error path leaves no child behind.
#[derive(Debug, Clone)]
pub struct CommandOracle {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandOracle {
    pub fn new(program: impl Into<String>) -> Self {
        CommandOracle { program: program.into(), args: Vec::new(), timeout: None }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Split a command line on whitespace into program and arguments.
    ///
    /// No quoting is understood; pass arguments containing spaces with
    /// [`CommandOracle::arg`].
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(parts.fold(CommandOracle::new(program), |oracle, arg| oracle.arg(arg)))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn unavailable(&self, child: &mut Child, what: &str, err: impl std::fmt::Display) -> ClassifyError {
        reap(child);
        ClassifyError::unavailable(format!("{what} '{}': {err}", self.program))
    }

    /// Poll until the child exits or the deadline passes.
    fn wait_for_exit(&self, child: &mut Child, started: Instant) -> Result<(), ClassifyError> {
        let Some(limit) = self.timeout else {
            return Ok(());
        };
        loop {
            match child.try_wait() {
                Ok(Some(_)) => return Ok(()),
                Ok(None) if started.elapsed() > limit => {
                    reap(child);
                    return Err(ClassifyError::unavailable(format!(
                        "'{}' timed out after {:?}",
                        self.program, limit
                    )));
                }
                Ok(None) => std::thread::sleep(POLL_INTERVAL),
                Err(err) => return Err(self.unavailable(child, "failed to wait for", err)),
            }
        }
    }
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

impl SentimentOracle for CommandOracle {
    fn predict(&self, text: &str) -> Result<Prediction, ClassifyError> {
        let started = Instant::now();
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| ClassifyError::unavailable(format!("failed to start '{}': {err}", self.program)))?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(text.as_bytes()) {
                // The program may answer without reading its input.
                Err(err) if err.kind() == ErrorKind::BrokenPipe => {}
                Err(err) => return Err(self.unavailable(&mut child, "failed to write to", err)),
                Ok(()) => {}
            }
        }

        self.wait_for_exit(&mut child, started)?;

        let output = child
            .wait_with_output()
            .map_err(|err| ClassifyError::unavailable(format!("failed to wait for '{}': {err}", self.program)))?;

        if !output.status.success() {
            return Err(ClassifyError::unavailable(format!("'{}' exited with {}", self.program, output.status)));
        }

        parse_answer(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse the first non-blank line of an oracle answer: `<label> <confidence>`.
pub(crate) fn parse_answer(stdout: &str) -> Result<Prediction, ClassifyError> {
    let line = stdout
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| ClassifyError::unavailable("oracle produced no output"))?;

    let mut fields = line.split(|c: char| c.is_whitespace() || c == ',').filter(|f| !f.is_empty());
    let (Some(label), Some(confidence)) = (fields.next(), fields.next()) else {
        return Err(ClassifyError::unavailable(format!("malformed oracle answer '{line}'")));
    };
    let confidence: f64 = confidence
        .parse()
        .map_err(|_| ClassifyError::unavailable(format!("malformed oracle confidence '{confidence}'")))?;

    Prediction::from_raw(label, confidence)
}

/// Serializes calls into an oracle that is not safe to call concurrently.
#[derive(Debug, Default)]
pub struct Serialized<O> {
    inner: Mutex<O>,
}

impl<O> Serialized<O> {
    pub fn new(oracle: O) -> Self {
        Serialized { inner: Mutex::new(oracle) }
    }

    pub fn into_inner(self) -> Option<O> {
        self.inner.into_inner().ok()
    }
}

impl<O: SentimentOracle> SentimentOracle for Serialized<O> {
    fn predict(&self, text: &str) -> Result<Prediction, ClassifyError> {
        let guard = self.inner.lock().map_err(|_| ClassifyError::unavailable("oracle lock poisoned"))?;
        guard.predict(text)
    }
}

/// Bounds every call to the inner oracle by `timeout`.
///
/// The call runs on a worker thread. When the deadline passes the worker is
/// abandoned and its eventual answer dropped; the inner call itself is not
/// cancelled. External programs should use [`CommandOracle::with_timeout`],
/// which kills the process instead.
#[derive(Debug)]
pub struct Deadline<O> {
    inner: Arc<O>,
    timeout: Duration,
}

impl<O> Deadline<O> {
    pub fn new(oracle: O, timeout: Duration) -> Self {
        Deadline { inner: Arc::new(oracle), timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<O> SentimentOracle for Deadline<O>
where
    O: SentimentOracle + Send + Sync + 'static,
{
    fn predict(&self, text: &str) -> Result<Prediction, ClassifyError> {
        let (tx, rx) = mpsc::channel();
        let oracle = Arc::clone(&self.inner);
        let text = text.to_string();

        std::thread::Builder::new()
            .name("resenha-oracle".to_string())
            .spawn(move || {
                // The receiver may be gone after a timeout.
                let _ = tx.send(oracle.predict(&text));
            })
            .map_err(|err| ClassifyError::unavailable(format!("failed to spawn oracle worker: {err}")))?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => {
                Err(ClassifyError::unavailable(format!("oracle timed out after {:?}", self.timeout)))
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(ClassifyError::unavailable("oracle worker panicked")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn from_raw_accepts_any_case() {
        assert_eq!(Prediction::from_raw("POSITIVE", 0.7).unwrap(), Prediction::new(Polarity::Positive, 0.7));
        assert_eq!(Prediction::from_raw("negative", 1.0).unwrap(), Prediction::new(Polarity::Negative, 1.0));
    }

    #[test]
    fn from_raw_rejects_unknown_label_and_bad_confidence() {
        assert!(Prediction::from_raw("neutral", 0.5).is_err());
        assert!(Prediction::from_raw("", 0.5).is_err());
        assert!(Prediction::from_raw("positive", -0.01).is_err());
        assert!(Prediction::from_raw("positive", f64::NAN).is_err());
        assert!(Prediction::from_raw("positive", 0.0).is_ok());
    }

    #[test]
    fn parses_command_answers() {
        assert_eq!(parse_answer("positive 0.93\n").unwrap(), Prediction::new(Polarity::Positive, 0.93));
        assert_eq!(parse_answer("\n  NEGATIVE,0.5  \n").unwrap(), Prediction::new(Polarity::Negative, 0.5));
        assert!(parse_answer("").is_err());
        assert!(parse_answer("positive").is_err());
        assert!(parse_answer("positive high").is_err());
        assert!(parse_answer("maybe 0.5").is_err());
    }

    #[test]
    fn command_line_splits_program_and_args() {
        let oracle = CommandOracle::from_command_line("python3 model.py --fast").unwrap();
        assert_eq!(oracle.program(), "python3");
        assert_eq!(oracle.args, vec!["model.py", "--fast"]);
        assert!(CommandOracle::from_command_line("   ").is_none());
    }

    #[test]
    fn missing_program_is_unavailable() {
        let oracle = CommandOracle::new("/nonexistent/resenha-oracle-binary");
        let err = oracle.predict("texto").unwrap_err();
        assert!(matches!(err, ClassifyError::OracleUnavailable { .. }));
    }

    #[cfg(unix)]
    fn sh(script: &str) -> CommandOracle {
        CommandOracle::new("sh").arg("-c").arg(script)
    }

    #[cfg(unix)]
    #[test]
    fn command_answer_is_parsed() {
        let oracle = sh("cat >/dev/null; echo positive 0.93");
        assert_eq!(oracle.predict("texto").unwrap(), Prediction::new(Polarity::Positive, 0.93));
    }

    #[cfg(unix)]
    #[test]
    fn command_reads_review_on_stdin() {
        let oracle = sh(r#"test "$(cat)" = "ótimo atendimento" && echo positive 0.8 || echo negative 0.8"#)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(oracle.predict("ótimo atendimento").unwrap().label, Polarity::Positive);
        assert_eq!(oracle.predict("outra coisa").unwrap().label, Polarity::Negative);
    }

    #[cfg(unix)]
    #[test]
    fn command_may_ignore_stdin() {
        let oracle = sh("echo negative 0.4");
        let long = "x".repeat(1 << 20);
        assert_eq!(oracle.predict(&long).unwrap(), Prediction::new(Polarity::Negative, 0.4));
    }

    #[cfg(unix)]
    #[test]
    fn command_failure_exit_is_unavailable() {
        let err = sh("cat >/dev/null; echo positive 0.9; exit 3").predict("x").unwrap_err();
        assert!(matches!(err, ClassifyError::OracleUnavailable { ref reason } if reason.contains("exited")));
    }

    #[cfg(unix)]
    #[test]
    fn command_timeout_kills_the_process() {
        let pidfile = std::env::temp_dir().join(format!("resenha-oracle-{}.pid", std::process::id()));
        let oracle = sh(&format!("echo $$ > {}; exec sleep 5", pidfile.display()))
            .with_timeout(Duration::from_millis(300));

        let started = std::time::Instant::now();
        let err = oracle.predict("x").unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(3));
        assert!(matches!(err, ClassifyError::OracleUnavailable { ref reason } if reason.contains("timed out")));

        let pid = std::fs::read_to_string(&pidfile).unwrap();
        let _ = std::fs::remove_file(&pidfile);
        let alive = Command::new("kill")
            .args(["-0", pid.trim()])
            .stderr(Stdio::null())
            .status()
            .unwrap()
            .success();
        assert!(!alive, "oracle process {} still running", pid.trim());
    }

    struct Counting {
        calls: Cell<usize>,
    }

    impl SentimentOracle for Counting {
        fn predict(&self, _text: &str) -> Result<Prediction, ClassifyError> {
            self.calls.set(self.calls.get() + 1);
            Ok(Prediction::new(Polarity::Positive, 0.6))
        }
    }

    #[test]
    fn serialized_makes_stateful_oracle_shareable() {
        let shared = Serialized::new(Counting { calls: Cell::new(0) });
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..10 {
                        shared.predict("x").unwrap();
                    }
                });
            }
        });
        assert_eq!(shared.into_inner().unwrap().calls.get(), 40);
    }

    struct Slow;

    impl SentimentOracle for Slow {
        fn predict(&self, _text: &str) -> Result<Prediction, ClassifyError> {
            std::thread::sleep(Duration::from_millis(500));
            Ok(Prediction::new(Polarity::Positive, 0.9))
        }
    }

    #[test]
    fn deadline_maps_timeout_to_unavailable() {
        let oracle = Deadline::new(Slow, Duration::from_millis(20));
        let err = oracle.predict("x").unwrap_err();
        assert!(matches!(err, ClassifyError::OracleUnavailable { ref reason } if reason.contains("timed out")));
    }

    #[test]
    fn deadline_passes_fast_answers_through() {
        let oracle = Deadline::new(StaticOracle::new(Polarity::Negative, 0.8), Duration::from_secs(5));
        assert_eq!(oracle.predict("x").unwrap(), Prediction::new(Polarity::Negative, 0.8));
    }
}
