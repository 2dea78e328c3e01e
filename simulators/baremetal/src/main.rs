#![warn(clippy::unwrap_used)]

mod suites;

use ironsim::{run_suite, AsyncTestFunc, Harness, Suite, TestSpec};
use tracing::{error, info};

use crate::suites::chassis::{
    test_create_chassis, test_delete_chassis, test_list_chassis, test_update_chassis,
};
use crate::suites::credentials::{
    test_credential_blob_round_trip, test_list_credentials, test_update_credential,
};
use crate::suites::environment::load_config;
use crate::suites::nodes::{test_create_node, test_create_node_defaults, test_update_node};
use crate::suites::ports::{test_create_port, test_create_port_default_address, test_update_port};

fn spec(name: &str, description: &str, run: AsyncTestFunc) -> TestSpec {
    TestSpec {
        name: name.to_string(),
        description: description.to_string(),
        run,
    }
}

fn suite(name: &str, description: &str, tests: Vec<TestSpec>) -> Suite {
    let mut suite = Suite {
        name: name.to_string(),
        description: description.to_string(),
        tests: vec![],
    };
    for test in tests {
        suite.add(test);
    }
    suite
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let harness = Harness::from_config(load_config()?)?;

    let mut suites = vec![
        suite(
            "baremetal-chassis",
            "Creates, lists, updates and deletes chassis.",
            vec![
                spec("create chassis", "Created chassis keeps its description.", test_create_chassis),
                spec("list chassis", "Created chassis shows up in the listing.", test_list_chassis),
                spec("update chassis", "Description can be replaced.", test_update_chassis),
                spec("delete chassis", "Deleted chassis leaves the listing.", test_delete_chassis),
            ],
        ),
        suite(
            "baremetal-nodes",
            "Creates and updates bare-metal nodes.",
            vec![
                spec("create node", "Explicit hardware properties are stored.", test_create_node),
                spec("create node defaults", "Omitted properties take their defaults.", test_create_node_defaults),
                spec("update node", "Hardware properties can be replaced.", test_update_node),
            ],
        ),
        suite(
            "baremetal-ports",
            "Creates and updates ports attached to nodes.",
            vec![
                spec("create port", "Created port keeps its MAC address.", test_create_port),
                spec("create port default address", "Omitted address is a random MAC.", test_create_port_default_address),
                spec("update port", "Address can be replaced.", test_update_port),
            ],
        ),
    ];

    if harness.has_identity() {
        suites.push(suite(
            "identity-credentials",
            "Creates, reads and updates EC2 credentials.",
            vec![
                spec("credential blob", "Blob reads back decoded.", test_credential_blob_round_trip),
                spec("update credential", "Keys can be replaced.", test_update_credential),
                spec("list credentials", "Created credential shows up in the listing.", test_list_credentials),
            ],
        ));
    } else {
        info!("identity service not configured, skipping credential suite");
    }

    let reports = run_suite(&harness, suites).await;

    let mut failed = 0;
    for report in &reports {
        let passed = report.results.iter().filter(|(_, result)| result.pass).count();
        info!(
            suite = %report.name,
            passed,
            total = report.results.len(),
            cleanup = report.cleanup.pass,
            "suite finished"
        );
        if !report.passed() {
            failed += 1;
        }
    }

    if failed > 0 {
        error!(failed, "some suites failed");
        anyhow::bail!("{failed} of {} suites failed", reports.len());
    }
    Ok(())
}
