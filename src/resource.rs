// resource.rs
// Last known value of a remote collection together with its loading and error flags.

use crate::error::FetchError;

#[derive(Debug)]
pub struct Resource<T> {
    data: Option<T>,
    error: Option<FetchError>,
    validating: bool,
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            validating: false,
        }
    }
}

impl<T> Resource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn is_validating(&self) -> bool {
        self.validating
    }

    /// Nothing to show yet and a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.validating && self.data.is_none()
    }

    /// Data is present but the last refresh failed.
    pub fn is_stale(&self) -> bool {
        self.data.is_some() && self.error.is_some()
    }

    /// Mark a request as in flight.
    pub fn begin(&mut self) {
        self.validating = true;
    }

    /// Record the outcome of a request. A failure keeps the previous data.
    pub fn settle(&mut self, outcome: Result<T, FetchError>) {
        self.validating = false;
        match outcome {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
    }

    /// Replace the data locally, without going back to the network.
    pub fn mutate(&mut self, data: T) {
        self.data = Some(data);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
