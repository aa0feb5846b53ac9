use crate::contract::{TestStateRequest, TestStateResponse};

/// Boundary to the service that executes one state of a definition.
///
/// `Err` means the call itself failed. State-level failures come back as a
/// normal response with a non-succeeded status.
pub trait TestStateApi {
    fn test_state(&self, request: &TestStateRequest) -> Result<TestStateResponse, String>;
}

impl<T: TestStateApi + ?Sized> TestStateApi for &T {
    fn test_state(&self, request: &TestStateRequest) -> Result<TestStateResponse, String> {
        (**self).test_state(request)
    }
}
