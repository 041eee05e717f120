use predicates::str;
use serde_json::Value;
use test_utilities::{geoschema_cmd, get_testdata};

fn schema_output(args: &[&str]) -> Value {
	let output = geoschema_cmd()
		.arg("schema")
		.args(args)
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();
	serde_json::from_slice(&output).unwrap()
}

#[test]
fn all_kinds() {
	let schema = schema_output(&[]);
	let kinds = schema["oneOf"]
		.as_array()
		.unwrap()
		.iter()
		.map(|fragment| fragment["properties"]["type"]["const"].as_str().unwrap().to_string())
		.collect::<Vec<_>>();
	assert_eq!(
		kinds,
		[
			"GeometryCollection",
			"LineString",
			"MultiLineString",
			"MultiPoint",
			"MultiPolygon",
			"Point",
			"Polygon"
		]
	);
}

#[test]
fn allowed_kinds() {
	let schema = schema_output(&["--allow", "Polygon,MultiPolygon"]);
	assert_eq!(schema["oneOf"].as_array().unwrap().len(), 2);
	assert_eq!(schema["oneOf"][0]["properties"]["type"]["const"], "MultiPolygon");

	let schema = schema_output(&["--allow", "Point"]);
	assert_eq!(schema["required"], serde_json::json!(["type", "coordinates"]));
}

#[test]
fn record() {
	let schema = schema_output(&["--record", &get_testdata("building.yaml")]);
	assert_eq!(schema["title"], "building");
	assert_eq!(schema["properties"]["height"], serde_json::json!({"type": ["number", "null"]}));
	assert_eq!(schema["properties"]["geometry"]["oneOf"].as_array().unwrap().len(), 2);
}

#[test]
fn duplicate_kinds() {
	geoschema_cmd()
		.args(["schema", "--allow", "Point,Point"])
		.assert()
		.failure()
		.stderr(str::contains("allowed geometry types contain duplicates: Point"));
}
