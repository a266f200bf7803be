use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use typenode_codegen::{Codegen, CodegenConfig, CodegenError, TypeScriptCodegen};
use typenode_core::type_node::{
    array, imported, literal, nullable, number, object, partial, recursive, reference, string,
    sum, Fields, Unknown,
};
use typenode_core::types::{
    identifier, imported_identifier, intersection_combinator, property, string_type,
    type_combinator, union_combinator,
};
use typenode_core::{CoreError, Module, TypeDeclaration};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn shapes_module() -> Module {
    let shape = sum("kind").of([
        (
            "circle",
            object(
                Fields::new()
                    .field("kind", literal(["circle"]))
                    .field("radius", number()),
            ),
        ),
        (
            "square",
            object(
                Fields::new()
                    .field("kind", literal(["square"]))
                    .field("side", number()),
            ),
        ),
    ]);

    let category = recursive::<(Unknown, Unknown), _>("Category", |this| {
        object(
            Fields::new()
                .field("name", string())
                .field("color", imported::<Unknown>("Color", "./color.ts", None))
                .describe("Display color"),
        )
        .intersect(partial(Fields::new().field("parent", this)))
    });

    let drawing = object(
        Fields::new()
            .field("shapes", array(shape.clone()))
            .field(
                "owner",
                nullable(imported::<Unknown>("User", "./user.ts", Some("Owner"))),
            )
            .field("category", reference::<Unknown>("Category")),
    );

    Module::new("./drawing.ts")
        .with_declaration(TypeDeclaration::from_type_node("Drawing", &drawing))
        .with_declaration(
            TypeDeclaration::new(
                "Shape",
                union_combinator(vec![identifier("Circle"), identifier("Square")]),
            )
            .with_description("Any drawable shape"),
        )
        .with_declaration(TypeDeclaration::from_type_node("Circle", &shape))
        .with_declaration(TypeDeclaration::new("Square", string_type()).exported(false))
        .with_declaration(TypeDeclaration::from_type_node("Category", &category))
}

#[test]
fn test_generate_module() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let mut codegen = TypeScriptCodegen::new(CodegenConfig::default());
    let output = codegen.generate(&shapes_module())?;

    assert_snapshot!(output, @r#"
import { Color } from "./color.ts";
import { User as Owner } from "./user.ts";

export type Circle = {
    kind: "circle";
    radius: number;
} | {
    kind: "square";
    side: number;
};

type Square = string;

/** Any drawable shape */
export type Shape = Circle | Square;

export type Category = {
    name: string;
    /** Display color */
    color: Color;
} & Partial<{
    parent: Category;
}>;

export type Drawing = {
    shapes: Array<{
        kind: "circle";
        radius: number;
    } | {
        kind: "square";
        side: number;
    }>;
    owner: null | Owner;
    category: Category;
};
"#);
    Ok(())
}

#[test]
fn test_generate_without_imports_or_sorting() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let module = Module::new("./pair.ts")
        .with_declaration(TypeDeclaration::new("Pair", identifier("Item")))
        .with_declaration(TypeDeclaration::new("Item", string_type()));

    let config = CodegenConfig::new()
        .emit_imports(false)
        .sort_declarations(false);
    let output = TypeScriptCodegen::new(config).generate(&module)?;

    assert_eq!(
        output,
        "export type Pair = Item;\n\nexport type Item = string;\n"
    );
    Ok(())
}

#[test]
fn test_sorted_output_puts_dependencies_first() -> Result<(), Box<dyn std::error::Error>> {
    let module = Module::new("./pair.ts")
        .with_declaration(TypeDeclaration::new("Pair", identifier("Item")))
        .with_declaration(TypeDeclaration::new("Item", string_type()));

    let output = TypeScriptCodegen::default().generate(&module)?;

    assert_eq!(
        output,
        "export type Item = string;\n\nexport type Pair = Item;\n"
    );
    Ok(())
}

#[test]
fn test_module_loaded_from_json() -> Result<(), Box<dyn std::error::Error>> {
    let json = r#"{
        "name": "./tagged.ts",
        "declarations": [
            {
                "name": "Tagged",
                "node": {
                    "Object": [
                        {
                            "key": "tag",
                            "node": { "Literal": { "String": "a" } },
                            "optional": false,
                            "description": null
                        },
                        {
                            "key": "ref",
                            "node": {
                                "Identifier": { "name": "Ref", "module": "./ref.ts", "alias": null }
                            },
                            "optional": true,
                            "description": null
                        }
                    ]
                },
                "exported": true,
                "description": null
            }
        ]
    }"#;

    let module: Module = serde_json::from_str(json)?;
    let config = CodegenConfig::from_toml_str("indent_size = 2")?;
    let output = TypeScriptCodegen::new(config).generate(&module)?;

    assert_eq!(
        output,
        "import { Ref } from \"./ref.ts\";\n\nexport type Tagged = {\n  tag: \"a\";\n  ref?: Ref;\n};\n"
    );
    Ok(())
}

#[test]
fn test_aliased_import_is_bound_in_body() -> Result<(), Box<dyn std::error::Error>> {
    let module = Module::new("./team.ts").with_declaration(TypeDeclaration::new(
        "Team",
        type_combinator(vec![
            property("lead", imported_identifier("User", "./user.ts", Some("Owner"))),
            property("members", imported_identifier("Member", "./user.ts", None)),
        ]),
    ));

    let output = TypeScriptCodegen::default().generate(&module)?;

    assert_eq!(
        output,
        "import { Member, User as Owner } from \"./user.ts\";\n\nexport type Team = {\n    lead: Owner;\n    members: Member;\n};\n"
    );
    Ok(())
}

#[test]
fn test_empty_intersection_declaration() -> Result<(), Box<dyn std::error::Error>> {
    let module = Module::new("./top.ts")
        .with_declaration(TypeDeclaration::new("Top", intersection_combinator(vec![])));

    let output = TypeScriptCodegen::default().generate(&module)?;

    assert_eq!(output, "export type Top = unknown;\n");
    Ok(())
}

#[test]
fn test_duplicate_declarations_fail() {
    let module = Module::new("./dup.ts")
        .with_declaration(TypeDeclaration::new("A", string_type()))
        .with_declaration(TypeDeclaration::new("A", string_type()));

    let result = TypeScriptCodegen::default().generate(&module);
    assert!(matches!(
        result,
        Err(CodegenError::Core(CoreError::DuplicateDeclaration(name))) if name == "A"
    ));
}

#[test]
fn test_reserved_declaration_name_fails() {
    let module =
        Module::new("./bad.ts").with_declaration(TypeDeclaration::new("string", string_type()));

    let result = TypeScriptCodegen::default().generate(&module);
    assert!(matches!(
        result,
        Err(CodegenError::Core(CoreError::InvalidIdentifier(_)))
    ));
}
