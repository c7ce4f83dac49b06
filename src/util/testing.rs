//! Shared test setup: one global tracing subscriber for all tests.

use std::env;
use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::TopicNode;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "debug");
        }
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Config loading logs every source it probes
    let noisy_modules = ["config"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_test_writer()
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Base tree used across tests:
///
/// ```text
/// root
/// ├── Perception
/// │   ├── Lidar (/lidar)
/// │   └── Cameras
/// │       ├── Front (/cam/front)
/// │       └── /cam/rear
/// ├── Planning
/// │   └── Trajectory (/plan/trajectory)
/// ├── Grid [extension]
/// └── Map (/map)
/// ```
pub fn sample_base_tree() -> TopicNode {
    TopicNode::group(
        "root",
        vec![
            TopicNode::group(
                "Perception",
                vec![
                    TopicNode::topic("Lidar", "/lidar"),
                    TopicNode::group(
                        "Cameras",
                        vec![
                            TopicNode::topic("Front", "/cam/front"),
                            TopicNode::unnamed_topic("/cam/rear"),
                        ],
                    ),
                ],
            ),
            TopicNode::group(
                "Planning",
                vec![TopicNode::topic("Trajectory", "/plan/trajectory")
                    .with_description("Planned path")],
            ),
            TopicNode::extension("Grid", "Grid"),
            TopicNode::topic("Map", "/map"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
        init_test_setup();
    }

    #[test]
    fn given_sample_tree_when_validating_then_is_well_formed() {
        let tree = sample_base_tree();
        assert!(tree.validate().is_ok());
        assert_eq!(tree.node_count(), 10);
    }
}
