use crate::context::TestContext;
use crate::error::Result;
use crate::harness::Harness;
use crate::types::TestResult;
use crate::utils::extract_test_results;
use ::std::{boxed::Box, future::Future, pin::Pin};
use async_trait::async_trait;
use core::fmt::Debug;
use dyn_clone::DynClone;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tracing::{error, info};

pub type AsyncTestFunc = fn(
    &mut TestContext,
) -> Pin<
    Box<
        dyn Future<Output = Result<()>> // future API / pollable
            + Send // required by non-single-threaded executors
            + '_,
    >,
>;

#[async_trait]
pub trait Testable: DynClone + Send + Sync {
    fn name(&self) -> &str;

    async fn run_test(&self, context: &mut TestContext) -> TestResult;
}

impl Debug for dyn Testable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Testable({})", self.name())
    }
}

dyn_clone::clone_trait_object!(Testable);

/// A group of tests sharing one [`TestContext`], torn down once every test
/// has run.
#[derive(Clone, Debug)]
pub struct Suite {
    pub name: String,
    pub description: String,
    pub tests: Vec<Box<dyn Testable>>,
}

impl Suite {
    pub fn add<T: Testable + 'static>(&mut self, test: T) {
        self.tests.push(Box::new(test))
    }
}

#[derive(Clone)]
pub struct TestSpec {
    pub name: String,
    pub description: String,
    // The Run function is invoked when the test executes. Failed assertions
    // may panic; the panic is reported as a failed test.
    pub run: AsyncTestFunc,
}

#[async_trait]
impl Testable for TestSpec {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run_test(&self, context: &mut TestContext) -> TestResult {
        let outcome = AssertUnwindSafe((self.run)(context)).catch_unwind().await;
        extract_test_results(outcome)
    }
}

/// Outcome of one suite: every test plus the teardown sweep.
#[derive(Clone, Debug, Default)]
pub struct SuiteReport {
    pub name: String,
    pub results: Vec<(String, TestResult)>,
    pub cleanup: TestResult,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.cleanup.pass && self.results.iter().all(|(_, result)| result.pass)
    }
}

pub async fn run_suite(host: &Harness, suites: Vec<Suite>) -> Vec<SuiteReport> {
    let mut reports = Vec::with_capacity(suites.len());

    for suite in suites {
        info!(suite = %suite.name, description = %suite.description, "starting suite");
        let mut context = host.context();
        let mut report = SuiteReport {
            name: suite.name.clone(),
            ..Default::default()
        };

        for test in &suite.tests {
            let result = test.run_test(&mut context).await;
            if result.pass {
                info!(suite = %suite.name, test = test.name(), "passed");
            } else {
                error!(suite = %suite.name, test = test.name(), details = %result.details, "failed");
            }
            report.results.push((test.name().to_string(), result));
        }

        report.cleanup = match context.teardown().await {
            Ok(()) => TestResult {
                pass: true,
                details: "".to_string(),
            },
            Err(err) => {
                error!(suite = %suite.name, %err, "cleanup failed");
                TestResult {
                    pass: false,
                    details: err.to_string(),
                }
            }
        };

        reports.push(report);
    }

    reports
}
