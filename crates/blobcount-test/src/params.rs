//! Regression test parameters and operations

use blobcount_core::RawImage;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare results and report failures (default)
    #[default]
    Compare,
    /// Compare, and also dump intermediate label maps to stderr
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the state of a regression test: the test name, the index of the
/// current check, the mode, and every failure seen so far. Checks never
/// panic; call [`RegParams::cleanup`] at the end and assert on its result.
pub struct RegParams {
    /// Name of the test (e.g., "conncomp")
    pub test_name: String,
    /// Current check index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current check index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record_failure(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if the values match within `delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Compare two label maps for exact equality
    ///
    /// Reports the first differing index.
    pub fn compare_labels(&mut self, expected: &[u32], actual: &[u32]) -> bool {
        self.index += 1;

        if expected.len() != actual.len() {
            let msg = format!(
                "Failure in {}_reg: label comparison for index {} - length {} vs {}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len()
            );
            self.record_failure(msg);
            return false;
        }

        if let Some(i) = expected.iter().zip(actual).position(|(a, b)| a != b) {
            let msg = format!(
                "Failure in {}_reg: label comparison for index {} - mismatch at {}: {} vs {}",
                self.test_name, self.index, i, expected[i], actual[i]
            );
            self.record_failure(msg);
            return false;
        }

        true
    }

    /// Compare two images pixel by pixel
    ///
    /// Row padding is ignored; size and format must match.
    pub fn compare_images(&mut self, expected: &RawImage, actual: &RawImage) -> bool {
        self.index += 1;

        if expected.width() != actual.width()
            || expected.height() != actual.height()
            || expected.format() != actual.format()
        {
            let msg = format!(
                "Failure in {}_reg: image comparison for index {} - {}x{} {} vs {}x{} {}",
                self.test_name,
                self.index,
                expected.width(),
                expected.height(),
                expected.format(),
                actual.width(),
                actual.height(),
                actual.format()
            );
            self.record_failure(msg);
            return false;
        }

        for y in 0..expected.height() {
            if expected.row(y) != actual.row(y) {
                let msg = format!(
                    "Failure in {}_reg: image comparison for index {} - row {} differs",
                    self.test_name, self.index, y
                );
                self.record_failure(msg);
                return false;
            }
        }

        true
    }

    /// Print a label map to stderr in display mode
    pub fn display_labels(&self, width: u32, labels: &[u32]) {
        if !self.display() || width == 0 {
            return;
        }
        for row in labels.chunks(width as usize) {
            let line: Vec<String> = row
                .iter()
                .map(|&l| {
                    if l == 0 {
                        ".".to_string()
                    } else {
                        l.to_string()
                    }
                })
                .collect();
            eprintln!("{}", line.join(" "));
        }
        eprintln!();
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
