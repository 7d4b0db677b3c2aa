use cumulus_stack::{StackConfig, StackError};

#[test]
fn template_body_reads_the_file() {
    let config = StackConfig::new("Existing")
        .with_template("tests/fixtures/templates/valid_template.yaml");

    let body = config.template_body().unwrap();
    assert!(body.contains("AWSTemplateFormatVersion"));
    assert!(body.contains("AWS::SNS::Topic"));
}

#[test]
fn template_body_fails_for_missing_path() {
    let config = StackConfig::new("NonExisting").with_template("nonExistingPath");

    let err = config.template_body().unwrap_err();
    assert!(matches!(err, StackError::Read { .. }));
}

#[test]
fn unset_template_path_fails_at_read_time() {
    let config = StackConfig::new("NonExisting");

    assert!(matches!(
        config.template_body(),
        Err(StackError::Read { .. })
    ));
}

#[test]
fn parameter_list_comes_from_the_parameter_file() {
    let config = StackConfig::new("Existing")
        .with_parameters("tests/fixtures/parameters/parameters.yaml");

    let list = config.parameter_list().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].parameter_key(), Some("TopicName"));
    assert_eq!(list[0].parameter_value(), Some("MyTopic"));
}

#[test]
fn defaults_match_the_create_contract() {
    let config = StackConfig::new("Existing");

    assert_eq!(config.stack_name(), "Existing");
    assert!(config.capabilities().is_empty());
    assert!(!config.disable_rollback());
    assert_eq!(config.timeout_minutes(), 60);
}

#[test]
fn builder_flags_are_carried() {
    let config = StackConfig::new("Existing")
        .with_capabilities(vec!["CAPABILITY_IAM".to_string()])
        .with_disable_rollback(true)
        .with_timeout_minutes(1);

    assert_eq!(config.capabilities(), ["CAPABILITY_IAM".to_string()]);
    assert!(config.disable_rollback());
    assert_eq!(config.timeout_minutes(), 1);
}
