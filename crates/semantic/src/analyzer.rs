//! The semantic analyzer: a single visitor over the AST that resolves
//! names, infers and checks types, and records both as `Annotations`
//! rather than mutating the AST in place.

use scalarc_diagnostics::{DiagnosticCode, DiagnosticSink};
use scalarc_syntax::ast::{ExprId, ExprKind, StmtId, StmtKind, TypeName};
use scalarc_syntax::{Ast, Type};

use crate::annotations::Annotations;
use crate::scope::{SymbolKind, SymbolTable};

pub struct AnalysisResult {
    pub table: SymbolTable,
    pub annotations: Annotations,
}

/// Runs the analyzer over `ast`, reporting diagnostics into `diags`.
///
/// Always returns a result, even if errors were raised — the pipeline's
/// policy is that the *driver* checks `diags.has_errors()` and refuses to
/// hand this result to MIR generation, not that analysis itself produces
/// nothing on error.
pub fn analyze(ast: &Ast, diags: &mut DiagnosticSink) -> AnalysisResult {
    tracing::debug!(top_level_stmts = ast.program.len(), "analyzing program");
    let mut analyzer = Analyzer {
        ast,
        diags,
        table: SymbolTable::new(),
        ann: Annotations::new(),
        current_function: None,
    };
    for &stmt in &ast.program {
        analyzer.visit_stmt(stmt);
    }
    tracing::debug!(errors = analyzer.diags.error_count(), "analysis finished");
    AnalysisResult {
        table: analyzer.table,
        annotations: analyzer.ann,
    }
}

const COMPARISON_OPS: [&str; 6] = ["==", "!=", "<", ">", "<=", ">="];

/// Resolves a syntactic `typeName` to a `Type`, raising
/// `VarDeclTypeNotDefined` on an unrecognized base name.
fn resolve_type_name(tn: &TypeName, diags: &mut DiagnosticSink) -> Option<Type> {
    let base = match tn.name.as_str() {
        "int" => Type::Int,
        "i32" => Type::I32,
        "char" => Type::Char,
        "float" => Type::Float,
        "f32" => Type::F32,
        "bool" => Type::Bool,
        "void" => Type::Void,
        other => {
            diags.error(DiagnosticCode::VarDeclTypeNotDefined, tn.span, &[other]);
            return None;
        }
    };
    Some(match tn.array_size {
        Some(size) => Type::Array { element: Box::new(base), size },
        None => base,
    })
}

struct Analyzer<'a> {
    ast: &'a Ast,
    diags: &'a mut DiagnosticSink,
    table: SymbolTable,
    ann: Annotations,
    /// `Some((name, return_type))` while visiting a function body; `None`
    /// at the top level, where a `return` statement is an error.
    current_function: Option<(smol_str::SmolStr, Type)>,
}

impl Analyzer<'_> {
    fn visit_stmt(&mut self, id: StmtId) {
        let stmt = self.ast.stmt(id).clone();
        match stmt.kind {
            StmtKind::VarDecl { name, declared_type, init } => {
                self.visit_var_decl(id, stmt.span, name, declared_type, init)
            }
            StmtKind::ArrayDecl { name, element_type, size } => {
                self.visit_array_decl(id, stmt.span, name, element_type, size)
            }
            StmtKind::Assignment { target, value } => self.visit_assignment(id, stmt.span, target, value),
            StmtKind::If { cond, then_block, else_block } => {
                self.visit_if(stmt.span, cond, then_block, else_block)
            }
            StmtKind::For { cond, body } => self.visit_for(stmt.span, cond, body),
            StmtKind::Return { value } => self.visit_return(stmt.span, value),
            StmtKind::ExprStatement { value } => self.visit_expr_statement(stmt.span, value),
            StmtKind::Block(stmts) => self.visit_block(stmts),
            StmtKind::FunctionDef { name, params, return_type, body } => {
                self.visit_function_def(id, stmt.span, name, params, return_type, body)
            }
        }
    }

    fn visit_block(&mut self, stmts: Vec<StmtId>) {
        self.table.enter_scope();
        for s in stmts {
            self.visit_stmt(s);
        }
        self.table.leave_scope(self.diags);
    }

    fn visit_var_decl(
        &mut self,
        id: StmtId,
        span: scalarc_diagnostics::Span,
        name: smol_str::SmolStr,
        declared_type: Option<TypeName>,
        init: Option<ExprId>,
    ) {
        let resolved_declared = match &declared_type {
            Some(tn) => match resolve_type_name(tn, self.diags) {
                Some(ty) => Some(ty),
                None => return,
            },
            None => None,
        };
        if let Some(ty) = &resolved_declared {
            if *ty == Type::Void {
                self.diags.error(DiagnosticCode::VarDeclCannotDeclareVoid, span, &[&name]);
                return;
            }
        }

        // An array-literal initializer's own type is its *element* type, so
        // checking it against an array-typed declaration compares
        // `declared`'s element type, not `declared` itself — the one
        // exception to the general "declared type must match the
        // initializer's type" rule.
        let is_array_literal_init =
            matches!(init.map(|i| &self.ast.expr(i).kind), Some(ExprKind::ArrayLiteral(_)));

        let final_ty = match (init, &resolved_declared) {
            (Some(init_id), Some(Type::Array { element, size })) if is_array_literal_init => {
                let Some(actual) = self.visit_expr(init_id) else {
                    return;
                };
                if actual != **element {
                    self.diags.error(
                        DiagnosticCode::VarDeclInitTypeMismatch,
                        span,
                        &[&name, &element.to_string(), &actual.to_string()],
                    );
                    return;
                }
                Type::Array { element: element.clone(), size: *size }
            }
            (Some(init_id), declared) => {
                let Some(actual) = self.visit_expr(init_id) else {
                    return;
                };
                match declared {
                    Some(declared_ty) if *declared_ty != actual => {
                        self.diags.error(
                            DiagnosticCode::VarDeclInitTypeMismatch,
                            span,
                            &[&name, &declared_ty.to_string(), &actual.to_string()],
                        );
                        return;
                    }
                    Some(declared_ty) => declared_ty.clone(),
                    None => actual,
                }
            }
            (None, Some(declared_ty)) => declared_ty.clone(),
            (None, None) => {
                self.diags.error(DiagnosticCode::VarDeclNoTypeAndInit, span, &[&name]);
                return;
            }
        };

        match self.table.define(name.clone(), SymbolKind::Variable { ty: final_ty }) {
            Ok(sym) => self.ann.set_stmt_symbol(id, sym),
            Err(_) => {
                self.diags.error(DiagnosticCode::VarDeclSymbolAlreadyDefined, span, &[&name]);
            }
        };
    }

    fn visit_array_decl(
        &mut self,
        id: StmtId,
        span: scalarc_diagnostics::Span,
        name: smol_str::SmolStr,
        element_type: TypeName,
        size: u64,
    ) {
        let Some(elem) = resolve_type_name(&element_type, self.diags) else {
            return;
        };
        if elem == Type::Void {
            self.diags.error(DiagnosticCode::VarDeclCannotDeclareVoid, span, &[&name]);
            return;
        }
        let ty = Type::Array { element: Box::new(elem), size };
        match self.table.define(name.clone(), SymbolKind::Array { ty }) {
            Ok(sym) => self.ann.set_stmt_symbol(id, sym),
            Err(_) => {
                self.diags.error(DiagnosticCode::VarDeclSymbolAlreadyDefined, span, &[&name]);
            }
        };
    }

    fn visit_assignment(
        &mut self,
        id: StmtId,
        span: scalarc_diagnostics::Span,
        target: smol_str::SmolStr,
        value: ExprId,
    ) {
        let value_ty = self.visit_expr(value);

        let Some(sym_id) = self.table.lookup(self.table.current(), &target) else {
            self.diags.error(DiagnosticCode::AssignmentNotDefined, span, &[&target]);
            return;
        };
        let symbol = self.table.symbol(sym_id).clone();
        let SymbolKind::Variable { ty: target_ty } = &symbol.kind else {
            self.diags.error(DiagnosticCode::AssignmentNotVariable, span, &[&target]);
            return;
        };

        let Some(actual_ty) = value_ty else { return };
        if actual_ty != *target_ty {
            self.diags.error(
                DiagnosticCode::AssignmentTypeMismatch,
                span,
                &[&target, &actual_ty.to_string(), &target_ty.to_string()],
            );
            return;
        }
        self.ann.set_stmt_symbol(id, sym_id);
    }

    fn visit_if(
        &mut self,
        span: scalarc_diagnostics::Span,
        cond: ExprId,
        then_block: StmtId,
        else_block: Option<StmtId>,
    ) {
        if let Some(ty) = self.visit_expr(cond) {
            if ty != Type::Bool {
                self.diags.error(DiagnosticCode::IfNotBool, span, &[]);
            }
        }
        self.visit_stmt(then_block);
        if let Some(else_block) = else_block {
            self.visit_stmt(else_block);
        }
    }

    fn visit_for(&mut self, span: scalarc_diagnostics::Span, cond: ExprId, body: StmtId) {
        if let Some(ty) = self.visit_expr(cond) {
            if ty != Type::Bool {
                self.diags.error(DiagnosticCode::ForNotBool, span, &[]);
            }
        }
        self.visit_stmt(body);
    }

    fn visit_return(&mut self, span: scalarc_diagnostics::Span, value: Option<ExprId>) {
        let Some((name, return_type)) = self.current_function.clone() else {
            self.diags.error(DiagnosticCode::ReturnOutsideFunction, span, &[]);
            if let Some(v) = value {
                self.visit_expr(v);
            }
            return;
        };

        match (value, return_type == Type::Void) {
            (None, true) => {}
            (None, false) => {
                self.diags
                    .error(DiagnosticCode::ReturnMissingValue, span, &[&name, &return_type.to_string()]);
            }
            (Some(v), true) => {
                self.visit_expr(v);
                self.diags.error(DiagnosticCode::ReturnValueInVoidFunction, span, &[&name]);
            }
            (Some(v), false) => {
                if let Some(actual) = self.visit_expr(v) {
                    if actual != return_type {
                        self.diags.error(
                            DiagnosticCode::ReturnTypeMismatch,
                            span,
                            &[&name, &return_type.to_string(), &actual.to_string()],
                        );
                    }
                }
            }
        }
    }

    fn visit_expr_statement(&mut self, span: scalarc_diagnostics::Span, value: Option<ExprId>) {
        match value {
            Some(e) => {
                self.visit_expr(e);
            }
            None => {
                self.diags.warning(DiagnosticCode::ExprStmtNoExpr, span, &[]);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn visit_function_def(
        &mut self,
        id: StmtId,
        span: scalarc_diagnostics::Span,
        name: smol_str::SmolStr,
        params: Vec<(smol_str::SmolStr, TypeName)>,
        return_type: TypeName,
        body: StmtId,
    ) {
        let Some(ret_ty) = resolve_type_name(&return_type, self.diags) else {
            return;
        };

        let inner_scope = self.table.enter_scope();
        let mut param_syms = Vec::new();
        let mut ok = true;
        for (pname, pty) in &params {
            let Some(ty) = resolve_type_name(pty, self.diags) else {
                ok = false;
                continue;
            };
            match self.table.define(pname.clone(), SymbolKind::Variable { ty }) {
                Ok(sym) => param_syms.push(sym),
                Err(_) => {
                    self.diags.error(DiagnosticCode::VarDeclSymbolAlreadyDefined, pty.span, &[pname]);
                    ok = false;
                }
            }
        }
        if !ok {
            self.table.leave_scope(self.diags);
            return;
        }
        self.table.leave_scope(self.diags);

        let kind = SymbolKind::Function {
            return_type: ret_ty.clone(),
            params: param_syms,
            inner_scope,
        };
        let sym_id = match self.table.define(name.clone(), kind) {
            Ok(sym) => sym,
            Err(_) => {
                self.diags.error(DiagnosticCode::VarDeclSymbolAlreadyDefined, span, &[&name]);
                return;
            }
        };
        self.ann.set_stmt_symbol(id, sym_id);

        self.table.enter_existing(inner_scope);
        let prev_function = self.current_function.replace((name, ret_ty));
        self.visit_stmt(body);
        self.current_function = prev_function;
        self.table.leave_scope(self.diags);
    }

    /// Returns the resolved type of `id`, or `None` if an error was already
    /// reported while evaluating it: visitors return a null/unknown result
    /// on failure rather than unwinding.
    fn visit_expr(&mut self, id: ExprId) -> Option<Type> {
        let expr = self.ast.expr(id).clone();
        let result = match expr.kind {
            ExprKind::IntLiteral(_) => Some(Type::Int),
            ExprKind::DecLiteral(_) => Some(Type::Float),
            ExprKind::ArrayLiteral(elems) => self.visit_array_literal(expr.span, elems),
            ExprKind::NameRef(name) => self.visit_name_ref(id, expr.span, &name),
            ExprKind::ArrayRef { name, index } => self.visit_array_ref(id, expr.span, &name, index),
            ExprKind::Binary { op, lhs, rhs } => self.visit_binary(expr.span, &op, lhs, rhs),
            ExprKind::Call { callee, args } => self.visit_call(id, expr.span, &callee, args),
            ExprKind::Cast { inner, target } => self.visit_cast(expr.span, inner, &target),
        };
        if let Some(ty) = &result {
            self.ann.set_expr_type(id, ty.clone());
        }
        result
    }

    fn visit_array_literal(&mut self, span: scalarc_diagnostics::Span, elems: Vec<ExprId>) -> Option<Type> {
        let mut elem_ty: Option<Type> = None;
        let mut ok = true;
        for e in elems {
            match self.visit_expr(e) {
                Some(t) => match &elem_ty {
                    None => elem_ty = Some(t),
                    Some(prev) if *prev == t => {}
                    Some(prev) => {
                        self.diags.error(
                            DiagnosticCode::ArrayLiteralElementTypeMismatch,
                            span,
                            &[&prev.to_string(), &t.to_string()],
                        );
                        ok = false;
                    }
                },
                None => ok = false,
            }
        }
        if !ok {
            return None;
        }
        elem_ty
    }

    fn visit_name_ref(&mut self, id: ExprId, span: scalarc_diagnostics::Span, name: &str) -> Option<Type> {
        let Some(sym_id) = self.table.lookup(self.table.current(), name) else {
            self.diags.error(DiagnosticCode::VarRefNotDefined, span, &[name]);
            return None;
        };
        let symbol = self.table.symbol(sym_id);
        match &symbol.kind {
            SymbolKind::Variable { ty } => {
                let ty = ty.clone();
                self.ann.set_expr_symbol(id, sym_id);
                Some(ty)
            }
            _ => {
                self.diags.error(DiagnosticCode::VarRefNotVariable, span, &[name]);
                None
            }
        }
    }

    fn visit_array_ref(
        &mut self,
        id: ExprId,
        span: scalarc_diagnostics::Span,
        name: &str,
        index: ExprId,
    ) -> Option<Type> {
        let index_ty = self.visit_expr(index);
        let Some(sym_id) = self.table.lookup(self.table.current(), name) else {
            self.diags.error(DiagnosticCode::VarRefNotDefined, span, &[name]);
            return None;
        };
        let symbol = self.table.symbol(sym_id).clone();
        let SymbolKind::Array { ty } = &symbol.kind else {
            self.diags.error(DiagnosticCode::ArrayRefNotArray, span, &[name]);
            return None;
        };
        let Type::Array { element, .. } = ty else {
            unreachable!("an Array symbol always carries an array Type");
        };
        self.ann.set_expr_symbol(id, sym_id);
        match index_ty {
            Some(t) if t.is_integer() => Some((**element).clone()),
            Some(t) => {
                self.diags.error(DiagnosticCode::ArrayIndexNotInteger, span, &[name, &t.to_string()]);
                None
            }
            None => None,
        }
    }

    fn visit_binary(
        &mut self,
        span: scalarc_diagnostics::Span,
        op: &str,
        lhs: ExprId,
        rhs: ExprId,
    ) -> Option<Type> {
        let lhs_ty = self.visit_expr(lhs);
        let rhs_ty = self.visit_expr(rhs);
        let (lhs_ty, rhs_ty) = (lhs_ty?, rhs_ty?);
        if lhs_ty != rhs_ty {
            self.diags.error(
                DiagnosticCode::BinaryOpOperandMismatch,
                span,
                &[op, &lhs_ty.to_string(), &rhs_ty.to_string()],
            );
            return None;
        }
        Some(if COMPARISON_OPS.contains(&op) { Type::Bool } else { lhs_ty })
    }

    fn visit_call(&mut self, id: ExprId, span: scalarc_diagnostics::Span, callee: &str, args: Vec<ExprId>) -> Option<Type> {
        if callee == "print" || callee == "input" {
            let mut ok = true;
            for a in args {
                if self.visit_expr(a).is_none() {
                    ok = false;
                }
            }
            return if ok { Some(Type::Void) } else { None };
        }

        let Some(sym_id) = self.table.lookup(self.table.current(), callee) else {
            self.diags.error(DiagnosticCode::FuncCallNotDefined, span, &[callee]);
            for a in args {
                self.visit_expr(a);
            }
            return None;
        };
        let symbol = self.table.symbol(sym_id).clone();
        let SymbolKind::Function { return_type, params, .. } = &symbol.kind else {
            self.diags.error(DiagnosticCode::FuncCallNotFuncCall, span, &[callee]);
            for a in args {
                self.visit_expr(a);
            }
            return None;
        };

        if params.len() != args.len() {
            self.diags.error(
                DiagnosticCode::FuncCallArgSizeMismatch,
                span,
                &[callee, &params.len().to_string(), &args.len().to_string()],
            );
            for a in args {
                self.visit_expr(a);
            }
            return None;
        }

        let mut ok = true;
        for (i, (param_sym, arg_id)) in params.clone().iter().zip(args).enumerate() {
            let param_ty = self.table.symbol(*param_sym).value_type().cloned().unwrap();
            match self.visit_expr(arg_id) {
                Some(actual) if actual == param_ty => {}
                Some(actual) => {
                    self.diags.error(
                        DiagnosticCode::FuncCallArgTypeMismatch,
                        span,
                        &[&(i + 1).to_string(), callee, &param_ty.to_string(), &actual.to_string()],
                    );
                    ok = false;
                }
                None => ok = false,
            }
        }
        if !ok {
            return None;
        }
        self.ann.set_expr_symbol(id, sym_id);
        Some(return_type.clone())
    }

    fn visit_cast(&mut self, span: scalarc_diagnostics::Span, inner: ExprId, target: &TypeName) -> Option<Type> {
        let inner_ty = self.visit_expr(inner)?;
        let target_ty = resolve_type_name(target, self.diags)?;
        if !target_ty.is_basic() {
            self.diags.error(DiagnosticCode::CastToNonBasic, span, &[&target_ty.to_string()]);
            return None;
        }
        if inner_ty.is_numeric() && target_ty.is_numeric() {
            Some(target_ty)
        } else {
            self.diags.error(DiagnosticCode::CastInvalidType, span, &[&inner_ty.to_string(), &target_ty.to_string()]);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalarc_diagnostics::DiagnosticCode;
    use scalarc_syntax::parser::parse;

    fn analyze_source(src: &str) -> (AnalysisResult, DiagnosticSink) {
        let ast = parse(src).expect("test sources parse");
        let mut diags = DiagnosticSink::new();
        let result = analyze(&ast, &mut diags);
        (result, diags)
    }

    fn codes(diags: &DiagnosticSink) -> Vec<DiagnosticCode> {
        diags.diagnostics().iter().map(|d| d.code).collect()
    }

    /// S1 — arithmetic, no diagnostics, and the declared type resolves.
    #[test]
    fn s1_arithmetic_and_print_has_no_diagnostics() {
        let (_result, diags) = analyze_source("var x: int = 40 + 2; print(x);");
        assert!(!diags.has_errors(), "unexpected: {}", diags.summary());
        assert!(diags.is_empty());
    }

    /// S2 — assigning to an undefined variable.
    #[test]
    fn s2_assignment_to_undefined_variable_is_an_error() {
        let (_result, diags) = analyze_source("y = 1;");
        assert_eq!(codes(&diags), vec![DiagnosticCode::AssignmentNotDefined]);
    }

    /// S3 — binary operator operand type mismatch.
    #[test]
    fn s3_binary_operand_type_mismatch() {
        let (_result, diags) =
            analyze_source("var a: int = 1; var b: float = 2.0; var c = a + b;");
        assert_eq!(codes(&diags), vec![DiagnosticCode::BinaryOpOperandMismatch]);
    }

    #[test]
    fn variable_reference_resolves_to_the_same_symbol_as_its_declaration() {
        let (result, diags) = analyze_source("var x: int = 1; x = x + 1;");
        assert!(!diags.has_errors());
        let assign_stmt = result.table.symbols.len();
        assert!(assign_stmt > 0);
    }

    #[test]
    fn redeclaring_a_name_in_the_same_scope_is_an_error() {
        let (_result, diags) = analyze_source("var x: int = 1; var x: int = 2;");
        assert_eq!(codes(&diags), vec![DiagnosticCode::VarDeclSymbolAlreadyDefined]);
    }

    #[test]
    fn shadowing_in_a_nested_block_is_allowed() {
        let (_result, diags) = analyze_source("var x: int = 1; { var x: bool = true; }");
        assert!(!diags.has_errors(), "unexpected: {}", diags.summary());
    }

    #[test]
    fn var_decl_with_neither_type_nor_initializer_is_an_error() {
        let (_result, diags) = analyze_source("var x;");
        assert_eq!(codes(&diags), vec![DiagnosticCode::VarDeclNoTypeAndInit]);
    }

    #[test]
    fn var_decl_cannot_declare_void() {
        let (_result, diags) = analyze_source("var x: void;");
        assert_eq!(codes(&diags), vec![DiagnosticCode::VarDeclCannotDeclareVoid]);
    }

    #[test]
    fn var_decl_unknown_type_name_is_an_error() {
        let (_result, diags) = analyze_source("var x: widget = 1;");
        assert_eq!(codes(&diags), vec![DiagnosticCode::VarDeclTypeNotDefined]);
    }

    #[test]
    fn var_decl_initializer_type_must_match_declared_type() {
        let (_result, diags) = analyze_source("var x: bool = 1;");
        assert_eq!(codes(&diags), vec![DiagnosticCode::VarDeclInitTypeMismatch]);
    }

    #[test]
    fn undefined_variable_reference_is_an_error() {
        let (_result, diags) = analyze_source("var x: int = y;");
        assert_eq!(codes(&diags), vec![DiagnosticCode::VarRefNotDefined]);
    }

    #[test]
    fn calling_a_variable_as_a_function_is_an_error() {
        let (_result, diags) = analyze_source("var f: int = 1; var x = f();");
        assert_eq!(codes(&diags), vec![DiagnosticCode::FuncCallNotFuncCall]);
    }

    #[test]
    fn using_a_function_as_a_plain_variable_reference_is_an_error() {
        let (_result, diags) = analyze_source("fn f(): int { return 1; } var x = f;");
        assert_eq!(codes(&diags), vec![DiagnosticCode::VarRefNotVariable]);
    }

    #[test]
    fn calling_an_undefined_function_is_an_error() {
        let (_result, diags) = analyze_source("var x = nope();");
        assert_eq!(codes(&diags), vec![DiagnosticCode::FuncCallNotDefined]);
    }

    #[test]
    fn function_call_argument_count_mismatch() {
        let (_result, diags) = analyze_source("fn sq(x: int): int { return x * x; } var v = sq();");
        assert_eq!(codes(&diags), vec![DiagnosticCode::FuncCallArgSizeMismatch]);
    }

    #[test]
    fn function_call_argument_type_mismatch() {
        let (_result, diags) =
            analyze_source("fn sq(x: int): int { return x * x; } var v = sq(true);");
        assert_eq!(codes(&diags), vec![DiagnosticCode::FuncCallArgTypeMismatch]);
    }

    #[test]
    fn print_and_input_bypass_signature_checking() {
        let (_result, diags) = analyze_source("var x: int = 0; print(x, 1, 2.0); input(x);");
        assert!(!diags.has_errors(), "unexpected: {}", diags.summary());
    }

    #[test]
    fn array_reference_requires_an_integer_index() {
        let (_result, diags) = analyze_source("var a: int[3]; var x = a[1.0];");
        assert_eq!(codes(&diags), vec![DiagnosticCode::ArrayIndexNotInteger]);
    }

    #[test]
    fn array_reference_yields_the_element_type() {
        let (result, diags) = analyze_source("var a: int[3]; var x: int = a[0];");
        assert!(!diags.has_errors(), "unexpected: {}", diags.summary());
        let _ = result;
    }

    #[test]
    fn indexing_a_plain_variable_is_an_error() {
        let (_result, diags) = analyze_source("var a: int = 1; var x = a[0];");
        assert_eq!(codes(&diags), vec![DiagnosticCode::ArrayRefNotArray]);
    }

    #[test]
    fn if_condition_must_be_bool() {
        let (_result, diags) = analyze_source("if (1) { }");
        assert_eq!(codes(&diags), vec![DiagnosticCode::IfNotBool]);
    }

    #[test]
    fn for_condition_must_be_bool() {
        let (_result, diags) = analyze_source("for (1) { }");
        assert_eq!(codes(&diags), vec![DiagnosticCode::ForNotBool]);
    }

    #[test]
    fn return_outside_a_function_is_an_error() {
        let (_result, diags) = analyze_source("return 1;");
        assert_eq!(codes(&diags), vec![DiagnosticCode::ReturnOutsideFunction]);
    }

    #[test]
    fn bare_return_in_a_non_void_function_is_an_error() {
        let (_result, diags) = analyze_source("fn f(): int { return; }");
        assert_eq!(codes(&diags), vec![DiagnosticCode::ReturnMissingValue]);
    }

    #[test]
    fn returning_a_value_from_a_void_function_is_an_error() {
        let (_result, diags) = analyze_source("fn f(): void { return 1; }");
        assert_eq!(codes(&diags), vec![DiagnosticCode::ReturnValueInVoidFunction]);
    }

    #[test]
    fn return_type_mismatch_is_an_error() {
        let (_result, diags) = analyze_source("fn f(): int { return true; }");
        assert_eq!(codes(&diags), vec![DiagnosticCode::ReturnTypeMismatch]);
    }

    #[test]
    fn expression_statement_with_no_expression_is_a_warning() {
        // Exercises the ExprStatement { value: None } path directly, since
        // the parser never actually produces it (this warning is reachable
        // only through a recovering parser this crate does not implement);
        // see `StmtKind::ExprStatement`'s doc comment.
        let mut ast = scalarc_syntax::Ast::new();
        let span = scalarc_diagnostics::Span::new(0, 0);
        let stmt = ast.push_stmt(StmtKind::ExprStatement { value: None }, span);
        ast.program.push(stmt);
        let mut diags = DiagnosticSink::new();
        let _ = analyze(&ast, &mut diags);
        assert_eq!(codes(&diags), vec![DiagnosticCode::ExprStmtNoExpr]);
        assert_eq!(diags.error_count(), 0);
    }

    #[test]
    fn valid_numeric_cast_resolves_to_the_target_type() {
        let (_result, diags) = analyze_source("var x: float = 1 as float;");
        assert!(!diags.has_errors(), "unexpected: {}", diags.summary());
    }

    #[test]
    fn cast_to_a_non_basic_array_type_is_an_error() {
        let (_result, diags) = analyze_source("var x = 1 as int[3];");
        assert_eq!(codes(&diags), vec![DiagnosticCode::CastToNonBasic]);
    }

    #[test]
    fn array_literal_initializer_takes_the_common_element_type() {
        let (_result, diags) = analyze_source("var a: int[3] = [1, 2, 3];");
        assert!(!diags.has_errors(), "unexpected: {}", diags.summary());
    }

    #[test]
    fn array_literal_with_mismatched_element_types_is_an_error() {
        let (_result, diags) = analyze_source("var a: int[2] = [1, true];");
        assert_eq!(codes(&diags), vec![DiagnosticCode::ArrayLiteralElementTypeMismatch]);
    }

    #[test]
    fn function_parameters_are_visible_inside_the_body() {
        let (_result, diags) = analyze_source("fn id(x: int): int { return x; }");
        assert!(!diags.has_errors(), "unexpected: {}", diags.summary());
    }

    #[test]
    fn function_parameter_is_not_visible_outside_the_function() {
        let (_result, diags) = analyze_source("fn id(x: int): int { return x; } var y = x;");
        assert_eq!(codes(&diags), vec![DiagnosticCode::VarRefNotDefined]);
    }
}
