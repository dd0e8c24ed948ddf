//! Behaviour-driven step definitions driving the command scenarios.

use super::helpers::{StubCollaborators, TEST_API_KEY, block_on, sample_routes, write_utf8};
use super::*;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use saferoute_core::test_support::{StubDirections, StubPlaceSearch};
use saferoute_core::{
    DirectionsError, EMERGENCY_TIPS, EmergencyServices, GeoPoint, PlaceRecord, SafetyAssessment,
};
use std::cell::RefCell;
use tempfile::TempDir;

const EMERGENCY_POINT: GeoPoint = GeoPoint::new(17.385, 78.4867);
const ASSESS_AT: &str = "2024-07-01T21:30:00";

#[derive(Debug)]
struct CommandWorld {
    _tmp: TempDir,
    routes_path: Utf8PathBuf,
    search: RefCell<StubPlaceSearch>,
    directions: RefCell<StubDirections>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CommandWorld {
    fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self {
            _tmp: tmp,
            routes_path: root.join("routes.json"),
            search: RefCell::new(StubPlaceSearch::new()),
            directions: RefCell::new(StubDirections::with_routes(Vec::new())),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn script_places(&self, centre: GeoPoint, places: Vec<PlaceRecord>) {
        let search = self.search.take().with_places_near(centre, places);
        self.search.replace(search);
    }

    fn run(&self, args: &[&str]) {
        let mut argv = vec!["saferoute".to_owned()];
        argv.extend(args.iter().map(|arg| (*arg).to_owned()));
        argv.extend(["--api-key".to_owned(), TEST_API_KEY.to_owned()]);

        let collaborators =
            StubCollaborators::new(self.search.take(), self.directions.borrow().clone());
        let parsed = Cli::try_parse_from(argv).map_err(CliError::from);
        let outcome = parsed.and_then(|cli| {
            let mut buffer = self.stdout.borrow_mut();
            block_on(dispatch(cli.command, &collaborators, &mut *buffer))
        });
        self.result.replace(Some(outcome));
    }

    fn stdout(&self) -> String {
        String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8")
    }

    fn expect_success(&self) {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        if let Err(err) = result {
            panic!("expected success, found {err:?}");
        }
    }

    fn with_error(&self, check: impl FnOnce(&CliError)) {
        let borrowed = self.result.borrow();
        let error = borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect_err("expected error");
        check(error);
    }
}

#[fixture]
fn world() -> CommandWorld {
    CommandWorld::new()
}

#[given("{count} candidate routes exist on disk")]
fn candidate_routes_exist(#[from(world)] world: &CommandWorld, count: usize) {
    let payload = serde_json::to_string_pretty(&sample_routes(count)).expect("serialize routes");
    write_utf8(&world.routes_path, payload.as_bytes());
}

#[given("hospitals are reported along every route")]
fn hospitals_along_routes(#[from(world)] world: &CommandWorld) {
    let vertices = sample_routes(1)
        .into_iter()
        .flat_map(|route| route.path.points().to_vec());
    for (i, vertex) in vertices.enumerate() {
        let spot = GeoPoint::new(vertex.lat + 0.001, vertex.lng);
        world.script_places(vertex, vec![PlaceRecord::new(format!("Hospital {i}"), spot)]);
    }
}

#[given("the routes file contains invalid JSON")]
fn routes_file_invalid(#[from(world)] world: &CommandWorld) {
    write_utf8(&world.routes_path, b"{ not valid json");
}

#[given("the directions service returns {count} routes")]
fn directions_return_routes(#[from(world)] world: &CommandWorld, count: usize) {
    world
        .directions
        .replace(StubDirections::with_routes(sample_routes(count)));
}

#[given("the directions service denies the request")]
fn directions_deny(#[from(world)] world: &CommandWorld) {
    world
        .directions
        .replace(StubDirections::with_error(DirectionsError::Service {
            status: "REQUEST_DENIED".to_owned(),
            message: "The provided API key is invalid.".to_owned(),
        }));
}

#[given("one place of every kind is reported near the point")]
fn place_near_point(#[from(world)] world: &CommandWorld) {
    let spot = GeoPoint::new(EMERGENCY_POINT.lat + 0.005, EMERGENCY_POINT.lng);
    world.script_places(EMERGENCY_POINT, vec![PlaceRecord::new("City Hospital", spot)]);
}

#[when("I run the analyze command")]
fn run_analyze(#[from(world)] world: &CommandWorld) {
    let routes_path = world.routes_path.to_string();
    world.run(&["analyze", &routes_path, "--seed", "7", "--at", ASSESS_AT]);
}

#[when("I run the plan command")]
fn run_plan(#[from(world)] world: &CommandWorld) {
    world.run(&[
        "plan",
        "--origin",
        "Charminar, Hyderabad",
        "--destination",
        "HITEC City",
        "--seed",
        "7",
        "--at",
        ASSESS_AT,
    ]);
}

#[when("I run the emergency command")]
fn run_emergency(#[from(world)] world: &CommandWorld) {
    let lat = EMERGENCY_POINT.lat.to_string();
    let lng = EMERGENCY_POINT.lng.to_string();
    world.run(&["emergency", "--lat", &lat, "--lng", &lng]);
}

#[then("the command succeeds and prints {count} ranked assessments")]
fn prints_ranked_assessments(#[from(world)] world: &CommandWorld, count: usize) {
    world.expect_success();
    let assessments: Vec<SafetyAssessment> =
        serde_json::from_str(&world.stdout()).expect("output should be JSON assessments");
    assert_eq!(assessments.len(), count);
    assert!(
        assessments
            .windows(2)
            .all(|pair| pair[0].safety_score >= pair[1].safety_score)
    );
}

#[then("the command fails because the routes JSON is invalid")]
fn fails_invalid_routes(#[from(world)] world: &CommandWorld) {
    world.with_error(|error| match error {
        CliError::ParseRoutes { path, .. } => assert_eq!(*path, world.routes_path),
        other => panic!("expected ParseRoutes, found {other:?}"),
    });
}

#[then("the command fails with the directions service status")]
fn fails_with_directions_status(#[from(world)] world: &CommandWorld) {
    world.with_error(|error| match error {
        CliError::Directions(DirectionsError::Service { status, .. }) => {
            assert_eq!(status, "REQUEST_DENIED");
        }
        other => panic!("expected Directions, found {other:?}"),
    });
    assert!(world.stdout().is_empty());
}

#[then("the output lists {count} hospital and the emergency tips")]
fn lists_emergency_services(#[from(world)] world: &CommandWorld, count: usize) {
    world.expect_success();
    let services: EmergencyServices =
        serde_json::from_str(&world.stdout()).expect("output should be JSON services");
    assert_eq!(services.location, EMERGENCY_POINT);
    assert_eq!(services.hospitals.len(), count);
    assert_eq!(services.hospitals[0].name, "City Hospital");
    assert_eq!(services.tips.len(), EMERGENCY_TIPS.len());
}

macro_rules! register_command_scenario {
    ($fn_name:ident, $index:literal) => {
        #[scenario(path = "tests/features/commands.feature", index = $index)]
        fn $fn_name(#[from(world)] world: CommandWorld) {
            let _ = world;
        }
    };
}

register_command_scenario!(analyze_happy_path, 0);
register_command_scenario!(analyze_invalid_json, 1);
register_command_scenario!(plan_happy_path, 2);
register_command_scenario!(plan_directions_failure, 3);
register_command_scenario!(emergency_lookup, 4);
