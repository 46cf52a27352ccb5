//! Integration tests for dispatch interception.
//!
//! Exercises the whole pipeline — configuration, filter gate, source
//! resolution, template rendering, sink — through wrapped dispatchers of
//! both builder protocols, and pins the observational contract:
//!
//! 1. **Pass-through**: wrapped results and failures equal the original's
//! 2. **Gating**: lines appear exactly when the filter says so
//! 3. **Content**: lines render the template against the resolved location
//! 4. **Composition**: double wrapping doubles lines, not executions
//! 5. **Property-based**: pass-through identity and one-line-per-call over
//!    random method names, payloads, and return values

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use hooklog_intercept::config::DispatchConfig;
use hooklog_intercept::interceptor::{BoxedDispatcher, Interceptor};
use hooklog_intercept::protocol::{CallEnv, ChainCall, MethodTable, TemplateCall};
use hooklog_intercept::sink::MemorySink;
use hooklog_intercept::template::LogTemplate;
use hooklog_stack::{CallStack, Frame, SourceLocation, StackSource};

/// Stack source handing out a fixed snapshot, simulating a calling context.
struct FixedStack(CallStack);

impl StackSource for FixedStack {
    fn snapshot(&self) -> CallStack {
        self.0.clone()
    }
}

/// Failure type of the simulated host dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DispatchFault {
    Halted,
}

fn user_target() -> Arc<MethodTable> {
    Arc::new(
        MethodTable::new()
            .define("before_save", SourceLocation::new("/app/app/models/user.rb", 4))
            .define("after_commit", SourceLocation::new("/app/lib/audit.rb", 21)),
    )
}

fn chain_call(method: &str) -> ChainCall {
    ChainCall {
        target: user_target(),
        method: method.into(),
        values: Vec::new(),
        continuation: None,
    }
}

fn template_call(method: &str) -> TemplateCall {
    TemplateCall {
        env: CallEnv {
            target: user_target(),
            method: method.into(),
        },
        values: Vec::new(),
        continuation: None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pass-through identity
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn wrapped_dispatcher_returns_original_value() {
    let sink = Arc::new(MemorySink::new());
    let interceptor = Interceptor::new(DispatchConfig::new("/app")).with_sink(Arc::clone(&sink));

    let original: BoxedDispatcher<ChainCall, i64, DispatchFault> = Box::new(|_| Ok(1234));
    let wrapped = interceptor.wrap_chain(original);

    assert_eq!(wrapped(&chain_call("before_save")), Ok(1234));
}

#[test]
fn wrapped_dispatcher_propagates_original_failure() {
    let sink = Arc::new(MemorySink::new());
    let interceptor = Interceptor::new(DispatchConfig::new("/app")).with_sink(Arc::clone(&sink));

    let original: BoxedDispatcher<ChainCall, i64, DispatchFault> =
        Box::new(|_| Err(DispatchFault::Halted));
    let wrapped = interceptor.wrap_chain(original);

    assert_eq!(wrapped(&chain_call("before_save")), Err(DispatchFault::Halted));
    assert_eq!(sink.len(), 1, "failure still gets its line before delegation");
}

#[test]
fn original_sees_untouched_arguments() {
    let interceptor = Interceptor::new(DispatchConfig::new("/app"))
        .with_sink(Arc::new(MemorySink::new()));

    let original: BoxedDispatcher<ChainCall, (), DispatchFault> = Box::new(|call| {
        assert_eq!(call.method, "before_save");
        assert_eq!(call.values.len(), 2);
        assert!(call.continuation.is_none());
        Ok(())
    });
    let wrapped = interceptor.wrap_chain(original);

    let mut call = chain_call("before_save");
    call.values = vec![Arc::new(7_u32), Arc::new("payload")];
    wrapped(&call).unwrap();
}

// ─────────────────────────────────────────────────────────────────────────────
// Filter gating
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn disabled_filter_logs_every_invocation() {
    let sink = Arc::new(MemorySink::new());
    let interceptor = Interceptor::new(DispatchConfig::new("/app")).with_sink(Arc::clone(&sink));

    let wrapped = interceptor.wrap_chain(Box::new(|_: &ChainCall| Ok::<_, DispatchFault>(())));
    for _ in 0..3 {
        wrapped(&chain_call("before_save")).unwrap();
    }
    assert_eq!(sink.len(), 3);
}

#[test]
fn enabled_filter_logs_in_scope_context() {
    let sink = Arc::new(MemorySink::new());
    let stack = CallStack::from_frames(vec![
        Frame::new("/app/vendor/gem.rb", 5, "call"),
        Frame::new("/app/app/models/user.rb", 10, "save"),
    ]);
    let interceptor = Interceptor::new(DispatchConfig::new("/app").with_filter(true))
        .with_sink(Arc::clone(&sink))
        .with_stack_source(FixedStack(stack));

    let wrapped = interceptor.wrap_chain(Box::new(|_: &ChainCall| Ok::<_, DispatchFault>(())));
    wrapped(&chain_call("before_save")).unwrap();
    assert_eq!(sink.messages(), vec!["Callback before_save"]);
}

#[test]
fn enabled_filter_suppresses_foreign_context() {
    let sink = Arc::new(MemorySink::new());
    let stack = CallStack::from_frames(vec![Frame::new("/app/vendor/gem.rb", 5, "call")]);
    let interceptor = Interceptor::new(DispatchConfig::new("/app").with_filter(true))
        .with_sink(Arc::clone(&sink))
        .with_stack_source(FixedStack(stack));

    let executed = Arc::new(AtomicUsize::new(0));
    let executed_in = Arc::clone(&executed);
    let wrapped = interceptor.wrap_chain(Box::new(move |_: &ChainCall| {
        executed_in.fetch_add(1, Ordering::SeqCst);
        Ok::<_, DispatchFault>(())
    }));

    wrapped(&chain_call("before_save")).unwrap();
    assert!(sink.is_empty());
    assert_eq!(executed.load(Ordering::SeqCst), 1);
}

#[test]
fn enabled_filter_suppresses_empty_context() {
    let sink = Arc::new(MemorySink::new());
    let interceptor = Interceptor::new(DispatchConfig::new("/app").with_filter(true))
        .with_sink(Arc::clone(&sink))
        .with_stack_source(FixedStack(CallStack::empty()));

    let wrapped = interceptor.wrap_chain(Box::new(|_: &ChainCall| Ok::<_, DispatchFault>(())));
    wrapped(&chain_call("before_save")).unwrap();
    assert!(sink.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Line content
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn default_template_renders_method_identifier() {
    let sink = Arc::new(MemorySink::new());
    let interceptor = Interceptor::new(DispatchConfig::new("/app")).with_sink(Arc::clone(&sink));

    let wrapped = interceptor.wrap_chain(Box::new(|_: &ChainCall| Ok::<_, DispatchFault>(())));
    wrapped(&chain_call("before_save")).unwrap();
    assert_eq!(sink.messages(), vec!["Callback before_save"]);
}

#[test]
fn located_template_renders_resolved_definition_site() {
    let sink = Arc::new(MemorySink::new());
    let config = DispatchConfig::new("/app").with_format(LogTemplate::new("Callback %s at %s:%s"));
    let interceptor = Interceptor::new(config).with_sink(Arc::clone(&sink));

    let wrapped = interceptor.wrap_chain(Box::new(|_: &ChainCall| Ok::<_, DispatchFault>(())));
    wrapped(&chain_call("after_commit")).unwrap();
    assert_eq!(sink.messages(), vec!["Callback after_commit at /app/lib/audit.rb:21"]);
}

#[test]
fn malformed_template_suppresses_line_but_delegates() {
    let sink = Arc::new(MemorySink::new());
    let config = DispatchConfig::new("/app").with_format(LogTemplate::new("Callback %d"));
    let interceptor = Interceptor::new(config).with_sink(Arc::clone(&sink));

    let wrapped = interceptor.wrap_chain(Box::new(|_: &ChainCall| Ok::<_, DispatchFault>(9)));
    assert_eq!(wrapped(&chain_call("before_save")), Ok(9));
    assert!(sink.is_empty());
}

#[test]
fn unresolvable_method_suppresses_line_but_delegates() {
    let sink = Arc::new(MemorySink::new());
    let interceptor = Interceptor::new(DispatchConfig::new("/app")).with_sink(Arc::clone(&sink));

    let wrapped = interceptor.wrap_chain(Box::new(|_: &ChainCall| Ok::<_, DispatchFault>(9)));
    assert_eq!(wrapped(&chain_call("dynamically_undefined")), Ok(9));
    assert!(sink.is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Protocol adapters and composition
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn template_protocol_adapter_logs_and_delegates() {
    let sink = Arc::new(MemorySink::new());
    let interceptor = Interceptor::new(DispatchConfig::new("/app")).with_sink(Arc::clone(&sink));

    let original: BoxedDispatcher<TemplateCall, &'static str, DispatchFault> =
        Box::new(|_| Ok("done"));
    let wrapped = interceptor.wrap_template(original);

    assert_eq!(wrapped(&template_call("before_save")), Ok("done"));
    assert_eq!(sink.messages(), vec!["Callback before_save"]);
}

#[test]
fn double_wrap_logs_twice_and_executes_once() {
    let sink = Arc::new(MemorySink::new());
    let interceptor = Interceptor::new(DispatchConfig::new("/app")).with_sink(Arc::clone(&sink));

    let executed = Arc::new(AtomicUsize::new(0));
    let executed_in = Arc::clone(&executed);
    let original: BoxedDispatcher<ChainCall, (), DispatchFault> = Box::new(move |_| {
        executed_in.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    let wrapped_twice = interceptor.wrap_chain(interceptor.wrap_chain(original));
    wrapped_twice(&chain_call("before_save")).unwrap();

    assert_eq!(sink.len(), 2, "one line per wrap layer");
    assert_eq!(executed.load(Ordering::SeqCst), 1, "innermost dispatcher runs once");
}

// ─────────────────────────────────────────────────────────────────────────────
// Property-based
// ─────────────────────────────────────────────────────────────────────────────

mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Pass-through identity and one-line-per-call hold for arbitrary
        /// method names, payload sizes, return values, and call counts.
        #[test]
        fn passthrough_and_line_count(
            method in "[a-z_]{1,24}",
            ret in any::<i64>(),
            payload in 0_usize..4,
            calls in 1_usize..8,
        ) {
            let sink = Arc::new(MemorySink::new());
            let interceptor =
                Interceptor::new(DispatchConfig::new("/app")).with_sink(Arc::clone(&sink));

            let target = Arc::new(
                MethodTable::new().define(&method, SourceLocation::new("/app/app/hooks.rb", 1)),
            );
            let call = ChainCall {
                target,
                method: method.clone(),
                values: (0..payload).map(|n| -> hooklog_intercept::protocol::Value {
                    Arc::new(n)
                }).collect(),
                continuation: None,
            };

            let wrapped = interceptor
                .wrap_chain(Box::new(move |_: &ChainCall| Ok::<_, DispatchFault>(ret)));
            for _ in 0..calls {
                prop_assert_eq!(wrapped(&call), Ok(ret));
            }

            let expected = format!("Callback {method}");
            prop_assert_eq!(sink.len(), calls);
            prop_assert!(sink.messages().iter().all(|line| line == &expected));
        }
    }
}
