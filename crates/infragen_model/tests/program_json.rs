use infragen_model::{ExprKind, Node, PackageMetadata, Program, Traverser, Type, TypeToken};

const PROGRAM: &str = r#"{
    "packages": [{ "name": "aws", "version": "v2.13.1" }],
    "nodes": [
        {
            "kind": "resource",
            "name": "logs",
            "token": "aws:s3/bucket:Bucket",
            "type": { "object": { "arn": { "output": "string" } } },
            "inputType": { "object": { "acl": "string" } },
            "inputs": [
                { "name": "acl", "value": { "expr": "literal", "value": "private", "type": "string" } }
            ]
        },
        {
            "kind": "outputVariable",
            "name": "bucketArn",
            "type": { "output": "string" },
            "value": {
                "expr": "reference",
                "root": "logs",
                "path": ["arn"],
                "type": { "output": "string" }
            }
        },
        {
            "kind": "localVariable",
            "name": "first",
            "value": {
                "expr": "reference",
                "root": "items",
                "path": [0, "name"]
            }
        }
    ]
}"#;

#[test]
fn reads_all_node_kinds_in_order() {
    let program = Program::from_json(PROGRAM).unwrap();
    let names: Vec<_> = program.nodes.iter().map(Node::name).collect();
    assert_eq!(names, vec!["logs", "bucketArn", "first"]);

    let Node::Resource(resource) = &program.nodes[0] else {
        panic!("expected a resource");
    };
    assert_eq!(resource.inputs.len(), 1);
    assert_eq!(resource.input_type.traverse_attr("acl"), Ok(Type::String));
    assert_eq!(
        resource.decompose_token().unwrap(),
        TypeToken {
            package: "aws".into(),
            module: "s3/bucket".into(),
            member: "Bucket".into(),
        }
    );
}

#[test]
fn reads_traversal_paths_and_default_types() {
    let program = Program::from_json(PROGRAM).unwrap();
    let Node::LocalVariable(local) = &program.nodes[2] else {
        panic!("expected a local");
    };
    assert_eq!(local.ty, Type::Dynamic);
    match &local.value.kind {
        ExprKind::Reference { root, path } => {
            assert_eq!(root, "items");
            assert_eq!(path, &vec![Traverser::Index(0), Traverser::Attr("name".into())]);
        }
        other => panic!("expected a reference, got {other:?}"),
    }
}

#[test]
fn package_versions_drive_metadata() {
    let program = Program::from_json(PROGRAM).unwrap();
    assert_eq!(program.major_version("aws"), Some(2));
    assert_eq!(program.packages[0].version.to_string(), "2.13.1");
}

#[test]
fn json_round_trips_through_serialization() {
    let program = Program::from_json(PROGRAM).unwrap();
    let again = Program::from_json(&program.to_json_pretty().unwrap()).unwrap();
    assert_eq!(program, again);
}

#[test]
fn rejects_malformed_versions() {
    let json = r#"{"packages": [{"name": "aws", "version": "two"}], "nodes": []}"#;
    assert!(Program::from_json(json).is_err());
}
