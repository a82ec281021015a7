//! Behaviour-driven step definitions driving the optimize CLI scenarios.

use super::helpers::{Workspace, sample_request, skip_logger, write_request, write_utf8};
use super::*;
use crate::optimize::run_optimize_with;
use camino::Utf8PathBuf;
use chrono::TimeDelta;
use course_core::test_support::place_at_km;
use course_core::{Category, CourseRecommendation, CourseRequest, InvalidInputError, OptimizeError};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

#[derive(Debug)]
struct OptimizeWorld {
    workspace: Workspace,
    request_path: Utf8PathBuf,
    include_request: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl OptimizeWorld {
    fn new() -> Self {
        let workspace = Workspace::new();
        let request_path = workspace.path("request.json");
        Self {
            workspace,
            request_path,
            include_request: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["course".to_owned(), "optimize".to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.request_path.as_str().to_owned());
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn printed_course(&self) -> CourseRecommendation {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        result.as_ref().expect("expected success");
        let stdout = String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8");
        serde_json::from_str(&stdout).expect("output should be a JSON course")
    }

    fn expect_error<T>(&self, inspect: impl FnOnce(&CliError) -> T) -> T {
        let borrowed = self.result.borrow();
        let error = borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect_err("expected error");
        inspect(error)
    }
}

#[fixture]
fn world() -> OptimizeWorld {
    OptimizeWorld::new()
}

#[given("a valid course request exists on disk")]
fn valid_request_exists(#[from(world)] world: &OptimizeWorld) {
    write_request(&world.request_path, &sample_request());
}

#[given("a course request with {count} places exists on disk")]
fn request_with_places_exists(#[from(world)] world: &OptimizeWorld, count: u32) {
    let places = (0..count)
        .map(|i| place_at_km(&format!("p{i}"), Category::Park, 0.5 * f64::from(i), 0.0))
        .collect();
    write_request(&world.request_path, &CourseRequest::new(places));
}

#[given("the course request contains invalid JSON")]
fn request_contains_invalid_json(#[from(world)] world: &OptimizeWorld) {
    write_utf8(&world.request_path, b"{ not valid json");
}

#[given("I omit the course request path")]
fn omit_request_path(#[from(world)] world: &OptimizeWorld) {
    *world.include_request.borrow_mut() = false;
}

#[given("the CLI flag {flag} is set")]
fn cli_flag_is_set(#[from(world)] world: &OptimizeWorld, flag: String) {
    world
        .cli_args
        .borrow_mut()
        .push(flag.trim_matches('"').to_owned());
}

#[when("I run the optimize command")]
fn run_optimize_command(#[from(world)] world: &OptimizeWorld) {
    assert!(world.workspace.root().is_dir());
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Optimize(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_optimize_with(args, skip_logger, &mut *buffer)
        }
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints JSON output")]
fn command_succeeds_and_prints_json(#[from(world)] world: &OptimizeWorld) {
    let course = world.printed_course();
    assert!((0.0..=1.0).contains(&course.optimization_score));
    let stdout = world.stdout.borrow();
    assert_eq!(stdout.last(), Some(&b'\n'));
}

#[then("the printed course has {count} stops")]
fn printed_course_has_stops(#[from(world)] world: &OptimizeWorld, count: usize) {
    assert_eq!(world.printed_course().stops.len(), count);
}

#[then("the first stop lasts {minutes} minutes")]
fn first_stop_lasts(#[from(world)] world: &OptimizeWorld, minutes: i64) {
    let course = world.printed_course();
    let first = course.stops.first().expect("at least one stop");
    assert_eq!(
        first.departure_time - first.arrival_time,
        TimeDelta::minutes(minutes)
    );
}

#[then("the command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &OptimizeWorld) {
    world.expect_error(|error| match error {
        CliError::ParseRequest { path, .. } => assert_eq!(*path, world.request_path),
        other => panic!("expected ParseRequest, found {other:?}"),
    });
}

#[then("the command fails because the place count is out of range")]
fn command_fails_place_count(#[from(world)] world: &OptimizeWorld) {
    world.expect_error(|error| match error {
        CliError::Optimize {
            source: OptimizeError::InvalidInput(InvalidInputError::PlaceCount { count, .. }),
            ..
        } => assert_eq!(*count, 2),
        other => panic!("expected a place count rejection, found {other:?}"),
    });
}

#[then("the command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &OptimizeWorld) {
    world.expect_error(|error| match error {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    });
}

macro_rules! register_optimize_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/optimize_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: OptimizeWorld) {
            let _ = world;
        }
    };
}

register_optimize_scenario!(optimize_happy_path, "optimising a request from JSON");
register_optimize_scenario!(
    optimize_visit_override,
    "overriding the default visit duration"
);
register_optimize_scenario!(optimize_invalid_json, "rejecting invalid JSON input");
register_optimize_scenario!(
    optimize_too_few_places,
    "rejecting requests with too few places"
);
register_optimize_scenario!(optimize_missing_request, "rejecting missing request paths");
