//! TypeScript module generator

use tracing::{debug, instrument};
use typenode_core::{get_nodes_imports, sort_declarations, Module, SyntaxNode};

use crate::config::CodegenConfig;
use crate::printer::Printer;
use crate::{Codegen, CodegenError};

/// Generates one `.ts` source file per [`Module`]
///
/// Imported identifiers are printed under the local name their import
/// statement binds.
#[derive(Debug, Clone)]
pub struct TypeScriptCodegen {
    config: CodegenConfig,
    printer: Printer,
}

impl Default for TypeScriptCodegen {
    fn default() -> Self {
        Self::new(CodegenConfig::default())
    }
}

impl TypeScriptCodegen {
    pub fn new(config: CodegenConfig) -> Self {
        let printer = Printer::new(&config).with_aliases(true);
        Self { config, printer }
    }
}

impl Codegen for TypeScriptCodegen {
    #[instrument(skip(self, module), fields(module = %module.name), level = "debug")]
    fn generate(&mut self, module: &Module) -> Result<String, CodegenError> {
        module.validate()?;

        let declarations = if self.config.sort_declarations {
            sort_declarations(&module.declarations)?
        } else {
            module.declarations.clone()
        };

        let mut sections = Vec::with_capacity(declarations.len() + 1);

        if self.config.emit_imports {
            let nodes: Vec<SyntaxNode> = declarations.iter().map(|d| d.node.clone()).collect();
            let imports = get_nodes_imports(&nodes);
            if !imports.is_empty() {
                sections.push(self.printer.print_imports(&imports));
            }
        }

        for declaration in &declarations {
            sections.push(self.printer.print_declaration(declaration));
        }

        debug!(
            "Generated {} declaration(s) for module {}",
            declarations.len(),
            module.name
        );

        let mut output = sections.join("\n\n");
        output.push('\n');
        Ok(output)
    }
}
