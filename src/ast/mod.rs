/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The statement and expression sum types and the Program
/// - expressions: Definitions for the expression node kinds
/// - statements: Definitions for the statement node kinds
pub mod ast;
pub mod expressions;
pub mod statements;
