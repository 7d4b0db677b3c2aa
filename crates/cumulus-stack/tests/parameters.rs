use std::io::Write;
use std::path::Path;

use cumulus_stack::StackError;
use cumulus_stack::parameters;

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn flat_mapping_loads() {
    let file = write_temp("TopicName: MyTopic\nEnvironment: staging\n");

    let params = parameters::load(file.path()).unwrap();
    assert_eq!(params.len(), 2);
    assert_eq!(params["TopicName"], "MyTopic");
    assert_eq!(params["Environment"], "staging");
}

#[test]
fn missing_file_is_a_read_error() {
    let err = parameters::load(Path::new("no/such/parameters.yaml")).unwrap_err();
    assert!(matches!(err, StackError::Read { .. }));
}

#[test]
fn nested_structure_is_a_decode_error() {
    let file = write_temp("Tags:\n  - one\n  - two\n");

    let err = parameters::load(file.path()).unwrap_err();
    match err {
        StackError::ParameterShape { path, .. } => assert_eq!(path, file.path()),
        other => panic!("expected ParameterShape, got {other:?}"),
    }
}

#[test]
fn non_string_scalar_is_a_decode_error() {
    // YAML would happily coerce the integer; the loader must not.
    let file = write_temp("Timeout: 1\n");

    let err = parameters::load(file.path()).unwrap_err();
    match err {
        StackError::ParameterShape { detail, .. } => assert!(detail.contains("Timeout")),
        other => panic!("expected ParameterShape, got {other:?}"),
    }
}

#[test]
fn sequence_document_is_rejected() {
    let file = write_temp("- one\n- two\n");

    let err = parameters::load(file.path()).unwrap_err();
    assert!(matches!(err, StackError::ParameterShape { .. }));
}

#[test]
fn decode_error_carries_parser_diagnostic() {
    let file = write_temp("TopicName: [unclosed\n");

    let err = parameters::load(file.path()).unwrap_err();
    assert!(matches!(err, StackError::ParameterDecode { .. }));
    // The serde_yaml diagnostic must survive in the source chain.
    let source = std::error::Error::source(&err).expect("decode error has a source");
    assert!(!source.to_string().is_empty());
}

#[test]
fn projection_emits_one_pair_per_key() {
    let file = write_temp("TopicName: MyTopic\nOwner: platform\n");

    let params = parameters::load(file.path()).unwrap();
    let list = parameters::to_parameter_list(&params);

    assert_eq!(list.len(), 2);
    let topic = list
        .iter()
        .find(|p| p.parameter_key() == Some("TopicName"))
        .unwrap();
    assert_eq!(topic.parameter_value(), Some("MyTopic"));
}

#[test]
fn empty_mapping_projects_to_empty_list() {
    let file = write_temp("{}\n");

    let params = parameters::load(file.path()).unwrap();
    assert!(parameters::to_parameter_list(&params).is_empty());
}
