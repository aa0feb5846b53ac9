use std::collections::VecDeque;
use std::sync::Mutex;

use order_workflow_harness::{TestStateApi, TestStateRequest, TestStateResponse};

/// Replays queued responses in order and records every submitted request.
pub struct ScriptedApi {
    responses: Mutex<VecDeque<Result<TestStateResponse, String>>>,
    requests: Mutex<Vec<TestStateRequest>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(responses: impl IntoIterator<Item = TestStateResponse>) -> Self {
        let api = Self::new();
        for response in responses {
            api.push_response(response);
        }
        api
    }

    pub fn push_response(&self, response: TestStateResponse) {
        self.responses
            .lock()
            .expect("poisoned mutex")
            .push_back(Ok(response));
    }

    pub fn push_failure(&self, message: &str) {
        self.responses
            .lock()
            .expect("poisoned mutex")
            .push_back(Err(message.to_string()));
    }

    pub fn requests(&self) -> Vec<TestStateRequest> {
        self.requests.lock().expect("poisoned mutex").clone()
    }

    pub fn last_request(&self) -> TestStateRequest {
        self.requests()
            .pop()
            .expect("at least one request should have been submitted")
    }
}

impl TestStateApi for ScriptedApi {
    fn test_state(&self, request: &TestStateRequest) -> Result<TestStateResponse, String> {
        self.requests
            .lock()
            .expect("poisoned mutex")
            .push(request.clone());
        self.responses
            .lock()
            .expect("poisoned mutex")
            .pop_front()
            .unwrap_or_else(|| Err(format!("no scripted response for {}", request.state_name)))
    }
}
