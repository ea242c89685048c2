/// FakeImplementation stands in for one method of a driven port and records the arguments of
/// every call. Async port methods are awkward to mock with the usual crates, so the fakes in
/// this crate are plain structs holding one FakeImplementation per method behind a [Mutex][std::sync::Mutex].
///
/// * [Args] represents the arguments passed to the function that should be captured on a call
/// * [Ret] represents the type of the function's return value
///
/// # Example
///
/// ```ignore
/// struct FakeTaskApi {
///     delete_task_result: FakeImplementation<i64, Result<serde_json::Value, ApiError>>,
/// }
///
/// impl TaskApi for Mutex<FakeTaskApi> {
///     async fn delete_task(&self, task_id: i64, _ext_cxn: &impl ExternalConnectivity)
///         -> Result<serde_json::Value, ApiError> {
///         let mut locked_self = self.lock().expect("fake task api mutex poisoned");
///         locked_self.delete_task_result.save_arguments(task_id);
///         locked_self.delete_task_result.return_value_result()
///     }
/// }
/// ```
pub struct FakeImplementation<Args, Ret> {
    saved_arguments: Vec<Args>,
    return_value: Option<Ret>,
}

impl<Args, Ret> FakeImplementation<Args, Ret> {
    /// Creates a new FakeImplementation
    pub fn new() -> FakeImplementation<Args, Ret> {
        FakeImplementation {
            saved_arguments: Vec::new(),
            return_value: None,
        }
    }

    /// Saves arguments from a single invocation of the FakeImplementation
    pub fn save_arguments(&mut self, arguments: Args) {
        self.saved_arguments.push(arguments)
    }

    /// Returns the list of arguments passed on every call to this FakeImplementation
    pub fn calls(&self) -> &[Args] {
        self.saved_arguments.as_slice()
    }
}

impl<Args, Success, Fail> FakeImplementation<Args, Result<Success, Fail>>
where
    Success: Clone,
    Fail: Clone,
{
    /// Set the result that should be returned when this FakeImplementation is invoked
    pub fn set_returned_result(&mut self, return_value: Result<Success, Fail>) {
        self.return_value = Some(return_value);
    }

    /// Retrieve the result that should be returned when this FakeImplementation is invoked
    pub fn return_value_result(&self) -> Result<Success, Fail> {
        match self.return_value {
            Some(Ok(ref ok_result)) => Ok(ok_result.clone()),
            Some(Err(ref err)) => Err(err.clone()),
            None => panic!("Tried to return from a function where the return value wasn't set!"),
        }
    }
}
