//! Test doubles shared by the use case tests.

use crate::cancellation::OperationCancellation;
use crate::ports::event_sink::{EventSink, WaveEvent};
use crate::ports::planner::{PlannerError, PlannerPort};
use crate::ports::tool_registry::{Capability, ToolRegistryPort};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wavefront_domain::{
    Arguments, ArgumentsExt, ConversationHistory, PlanningResult, ResultAccumulator, ToolCall,
    ToolDefinition, ToolError, ToolSpec,
};

// ==================== Registry ====================

pub(crate) struct TestRegistry {
    spec: ToolSpec,
    capabilities: HashMap<String, Arc<dyn Capability>>,
}

impl TestRegistry {
    /// Registry with `echo` and `sleep`
    pub(crate) fn new() -> Self {
        Self {
            spec: ToolSpec::new(),
            capabilities: HashMap::new(),
        }
        .with("echo", Arc::new(EchoCapability))
        .with("sleep", Arc::new(SleepCapability))
    }

    pub(crate) fn with(self, name: &str, capability: Arc<dyn Capability>) -> Self {
        self.with_definition(ToolDefinition::new(name, name), capability)
    }

    pub(crate) fn with_definition(
        mut self,
        definition: ToolDefinition,
        capability: Arc<dyn Capability>,
    ) -> Self {
        self.capabilities.insert(definition.name.clone(), capability);
        self.spec = self.spec.register(definition);
        self
    }

    pub(crate) fn with_alias(mut self, alias: &str, canonical: &str) -> Self {
        self.spec = self.spec.register_alias(alias, canonical);
        self
    }
}

impl ToolRegistryPort for TestRegistry {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    fn resolve(&self, name: &str) -> Option<Arc<dyn Capability>> {
        let canonical = self.spec.resolve(name)?;
        self.capabilities.get(canonical).cloned()
    }
}

// ==================== Capabilities ====================

/// Returns its arguments as an object
pub(crate) struct EchoCapability;

#[async_trait]
impl Capability for EchoCapability {
    async fn invoke(&self, arguments: Arguments) -> Result<Value, ToolError> {
        Ok(Value::Object(arguments.into_iter().collect()))
    }
}

/// Sleeps `ms` milliseconds
pub(crate) struct SleepCapability;

#[async_trait]
impl Capability for SleepCapability {
    async fn invoke(&self, arguments: Arguments) -> Result<Value, ToolError> {
        let ms = arguments.get_u64("ms").unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok(json!({ "slept_ms": ms }))
    }
}

/// Tracks how many invocations overlap
pub(crate) struct GaugeCapability {
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl GaugeCapability {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Capability for GaugeCapability {
    async fn invoke(&self, _arguments: Arguments) -> Result<Value, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(json!("ok"))
    }
}

/// Fails the first `failures` invocations, then succeeds
pub(crate) struct FlakyCapability {
    failures: AtomicU32,
    transient: bool,
    calls: AtomicU32,
}

impl FlakyCapability {
    pub(crate) fn new(failures: u32, transient: bool) -> Self {
        Self {
            failures: AtomicU32::new(failures),
            transient,
            calls: AtomicU32::new(0),
        }
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Capability for FlakyCapability {
    async fn invoke(&self, _arguments: Arguments) -> Result<Value, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(if self.transient {
                ToolError::transient("upstream returned 503")
            } else {
                ToolError::invalid_argument("bad request")
            });
        }
        Ok(json!("recovered"))
    }
}

pub(crate) struct PanicCapability;

#[async_trait]
impl Capability for PanicCapability {
    async fn invoke(&self, _arguments: Arguments) -> Result<Value, ToolError> {
        panic!("capability blew up");
    }
}

/// Cancels the operation from inside a running call, then keeps working
pub(crate) struct CancellingCapability {
    pub(crate) token: OperationCancellation,
    pub(crate) reason: String,
    pub(crate) delay: Duration,
}

#[async_trait]
impl Capability for CancellingCapability {
    async fn invoke(&self, _arguments: Arguments) -> Result<Value, ToolError> {
        self.token.cancel(self.reason.clone());
        tokio::time::sleep(self.delay).await;
        Ok(json!("finished anyway"))
    }
}

// ==================== Event sinks ====================

#[derive(Default)]
pub(crate) struct RecordingSink {
    events: Mutex<Vec<WaveEvent>>,
}

impl RecordingSink {
    pub(crate) fn events(&self) -> Vec<WaveEvent> {
        self.events.lock().unwrap().clone()
    }

    pub(crate) fn names(&self) -> Vec<&'static str> {
        self.events().iter().map(WaveEvent::name).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &WaveEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

/// Cancels the token when the given wave completes
pub(crate) struct CancelAfterWave {
    pub(crate) token: OperationCancellation,
    pub(crate) wave_index: usize,
    pub(crate) reason: String,
}

impl EventSink for CancelAfterWave {
    fn emit(&self, event: &WaveEvent) {
        if let WaveEvent::WaveComplete { wave_index, .. } = event
            && *wave_index == self.wave_index
        {
            self.token.cancel(self.reason.clone());
        }
    }
}

pub(crate) struct PanickingSink;

impl EventSink for PanickingSink {
    fn emit(&self, _event: &WaveEvent) {
        panic!("sink blew up");
    }
}

// ==================== Planners ====================

/// Returns scripted responses in order, then `done`
pub(crate) struct ScriptedPlanner {
    responses: Mutex<VecDeque<Result<PlanningResult, PlannerError>>>,
    /// (ids in the accumulator, history length) at each call
    seen: Mutex<Vec<(Vec<String>, usize)>>,
    history: Mutex<Option<ConversationHistory>>,
}

impl ScriptedPlanner {
    pub(crate) fn new(responses: Vec<Result<PlanningResult, PlannerError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            seen: Mutex::new(Vec::new()),
            history: Mutex::new(None),
        }
    }

    pub(crate) fn steps(steps: Vec<Vec<ToolCall>>) -> Self {
        Self::new(
            steps
                .into_iter()
                .map(|tools| Ok(PlanningResult::continue_with(tools)))
                .collect(),
        )
    }

    pub(crate) fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub(crate) fn seen(&self) -> Vec<(Vec<String>, usize)> {
        self.seen.lock().unwrap().clone()
    }

    pub(crate) fn last_history(&self) -> Option<ConversationHistory> {
        self.history.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlannerPort for ScriptedPlanner {
    async fn plan(
        &self,
        results: &ResultAccumulator,
        history: &ConversationHistory,
    ) -> Result<PlanningResult, PlannerError> {
        self.seen.lock().unwrap().push((
            results.ids().map(|id| id.to_string()).collect(),
            history.len(),
        ));
        *self.history.lock().unwrap() = Some(history.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(PlanningResult::done()))
    }
}

/// Never satisfied: always asks for one more trivial call
#[derive(Default)]
pub(crate) struct InsatiablePlanner {
    calls: AtomicU32,
}

impl InsatiablePlanner {
    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlannerPort for InsatiablePlanner {
    async fn plan(
        &self,
        _results: &ResultAccumulator,
        _history: &ConversationHistory,
    ) -> Result<PlanningResult, PlannerError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PlanningResult::continue_with(vec![ToolCall::new(
            format!("noop-{}", n),
            "echo",
        )]))
    }
}
