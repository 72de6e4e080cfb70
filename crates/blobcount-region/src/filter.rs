//! Size-based blob filtering configuration

/// Blob size limits applied after labeling.
///
/// When `coupled` is `false` a blob is removed if *either* dimension falls
/// outside the limits. When `coupled` is `true` it is removed only if *both*
/// dimensions are too small, or both are too large.
///
/// # Examples
///
/// ```
/// use blobcount_region::SizeFilter;
///
/// let filter = SizeFilter::enabled().with_min_size(5, 5);
/// assert!(filter.should_remove(4, 10));
///
/// let coupled = filter.with_coupled(true);
/// assert!(!coupled.should_remove(4, 10));
/// assert!(coupled.should_remove(4, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeFilter {
    /// Run the filtering pass after labeling
    pub enabled: bool,
    /// Minimum allowed width
    pub min_width: i32,
    /// Minimum allowed height
    pub min_height: i32,
    /// Maximum allowed width
    pub max_width: i32,
    /// Maximum allowed height
    pub max_height: i32,
    /// Combine width and height conditions with AND instead of OR
    pub coupled: bool,
}

impl Default for SizeFilter {
    fn default() -> Self {
        Self {
            enabled: false,
            min_width: 1,
            min_height: 1,
            max_width: i32::MAX,
            max_height: i32::MAX,
            coupled: false,
        }
    }
}

impl SizeFilter {
    /// Create an enabled filter with no effective limits.
    ///
    /// [`SizeFilter::default`] is the same filter, disabled.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Enable or disable the filtering pass
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the minimum width and height
    pub fn with_min_size(mut self, min_width: i32, min_height: i32) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    /// Set the maximum width and height
    pub fn with_max_size(mut self, max_width: i32, max_height: i32) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    /// Set the coupling rule
    pub fn with_coupled(mut self, coupled: bool) -> Self {
        self.coupled = coupled;
        self
    }

    /// Whether a blob of the given size is removed by this filter.
    ///
    /// Ignores `enabled`.
    pub fn should_remove(&self, width: i32, height: i32) -> bool {
        if self.coupled {
            (width < self.min_width && height < self.min_height)
                || (width > self.max_width && height > self.max_height)
        } else {
            width < self.min_width
                || height < self.min_height
                || width > self.max_width
                || height > self.max_height
        }
    }
}
