//! The MIR generator (spec.md §4.5): lowers a resolved, typed AST into a
//! per-function control-flow graph of basic blocks.
//!
//! Every local (parameter or `VarDecl`/`ArrayDecl`) is materialized as a
//! stack slot via `alloca`; reads go through `load`, writes through `store`.
//! This avoids phi nodes entirely (`SPEC_FULL.md` §9), at the cost of one
//! extra load per read — the same trade-off well-known compiler tutorials
//! make, and the one spec.md §9 explicitly retains.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use scalarc_diagnostics::{DiagnosticCode, DiagnosticSink, Span};
use scalarc_semantic::{AnalysisResult, Annotations, SymbolId, SymbolKind, SymbolTable};
use scalarc_syntax::ast::{ExprId, ExprKind, StmtId, StmtKind};
use scalarc_syntax::Ast;

use crate::function::Param;
use crate::instruction::{BinOpcode, CastKind, Instruction};
use crate::mir_types::translate_type;
use crate::{BasicBlockId, MirFunction, MirModule, MirType, Terminator, Value, ValueId};

/// Runs MIR generation over `ast` using the symbols/types `result` recorded,
/// reporting any generation-time diagnostics (e.g. `input`'s argument
/// contract) into `diags`.
///
/// Per the pipeline's propagation policy (spec.md §4.1), this is only
/// meaningful to call once the driver has confirmed `diags.has_errors()` is
/// false after semantic analysis; this function itself does not re-check
/// that, since it has no way to distinguish "no errors yet" from "errors the
/// caller chose to ignore".
pub fn generate(ast: &Ast, result: &AnalysisResult, diags: &mut DiagnosticSink) -> MirModule {
    let mut gen = ModuleGen {
        ast,
        ann: &result.annotations,
        table: &result.table,
        diags,
        module: MirModule::new("module"),
    };
    gen.run();
    tracing::debug!(functions = gen.module.functions.len(), "generated MIR module");
    gen.module
}

struct ModuleGen<'a> {
    ast: &'a Ast,
    ann: &'a Annotations,
    table: &'a SymbolTable,
    diags: &'a mut DiagnosticSink,
    module: MirModule,
}

impl ModuleGen<'_> {
    fn run(&mut self) {
        // Pre-pass: every function definition gets its own MIR function
        // before `main` is synthesized (spec.md §4.5 "top-level strategy").
        for &stmt in &self.ast.program.clone() {
            if let StmtKind::FunctionDef { .. } = &self.ast.stmt(stmt).kind {
                self.lower_function_def(stmt);
            }
        }
        self.lower_main();
    }

    fn lower_function_def(&mut self, stmt_id: StmtId) {
        let stmt = self.ast.stmt(stmt_id).clone();
        let StmtKind::FunctionDef { name, body, .. } = stmt.kind else {
            unreachable!("caller filters to FunctionDef nodes");
        };

        let Some(sym_id) = self.ann.stmt_symbol(stmt_id) else {
            self.diags.compiler_internal(DiagnosticCode::StmtVisitCouldNotCast, &[]);
            return;
        };
        let symbol = self.table.symbol(sym_id).clone();
        let SymbolKind::Function { return_type, params, .. } = &symbol.kind else {
            self.diags.compiler_internal(DiagnosticCode::StmtVisitCouldNotCast, &[]);
            return;
        };

        let mir_return_ty = translate_type(return_type);
        let mir_params: Vec<Param> = params
            .iter()
            .map(|&p| {
                let param_sym = self.table.symbol(p);
                Param {
                    name: param_sym.name.clone(),
                    ty: translate_type(param_sym.value_type().expect("parameter symbols are always Variable")),
                }
            })
            .collect();
        let param_syms = params.clone();

        let mut function = MirFunction::new(name.clone(), mir_return_ty.clone(), mir_params);
        function.push_block("entry");

        let mut fgen = FunctionGen {
            ast: self.ast,
            ann: self.ann,
            table: self.table,
            diags: self.diags,
            function,
            current: BasicBlockId::new(0),
            next_value: 0,
            locals: FxHashMap::default(),
        };
        fgen.bind_parameters(&param_syms);
        fgen.lower_block_stmts(body);
        fgen.seal_fallthrough(&name, &mir_return_ty, stmt.span, false);

        self.module.push_function(fgen.function);
    }

    fn lower_main(&mut self) {
        let mut function = MirFunction::new("main", MirType::Int64, vec![]);
        function.push_block("entry");

        let mut fgen = FunctionGen {
            ast: self.ast,
            ann: self.ann,
            table: self.table,
            diags: self.diags,
            function,
            current: BasicBlockId::new(0),
            next_value: 0,
            locals: FxHashMap::default(),
        };

        for &stmt in &self.ast.program.clone() {
            if !matches!(self.ast.stmt(stmt).kind, StmtKind::FunctionDef { .. }) {
                fgen.lower_stmt(stmt);
            }
        }
        fgen.seal_fallthrough("main", &MirType::Int64, Span::new(0, 0), true);

        self.module.push_function(fgen.function);
    }
}

/// A local variable's storage: the pointer `alloca` produced, and the
/// variable's own (possibly array) type, needed later to reconstruct a
/// `Gep`'s element/aggregate types.
#[derive(Clone)]
struct Local {
    pointer: Value,
    value_ty: MirType,
}

struct FunctionGen<'a> {
    ast: &'a Ast,
    ann: &'a Annotations,
    table: &'a SymbolTable,
    diags: &'a mut DiagnosticSink,
    function: MirFunction,
    current: BasicBlockId,
    next_value: u32,
    locals: FxHashMap<SymbolId, Local>,
}

impl FunctionGen<'_> {
    fn new_value_id(&mut self) -> ValueId {
        let id = ValueId::new(self.next_value as usize);
        self.next_value += 1;
        id
    }

    fn push(&mut self, instr: Instruction) {
        self.function.block_mut(self.current).push(instr);
    }

    /// Allocates storage for `value_ty` at the head of the entry block
    /// (spec.md §4.5: "alloca instructions ... not at the point of
    /// declaration — this simplifies dominance"), returning the pointer.
    /// Invariant 6 (spec.md §8) wants a `Gep`'s base to be a pointer to the
    /// *declared aggregate type*, so array locals alloca the whole array
    /// type rather than a single element.
    fn alloca(&mut self, value_ty: MirType) -> Value {
        let array_size = if let MirType::Array { size, .. } = &value_ty { Some(*size) } else { None };
        let id = self.new_value_id();
        let result_ty = MirType::pointer(value_ty.clone());
        let instr = Instruction::Alloca {
            result: id,
            result_ty: result_ty.clone(),
            allocated_ty: value_ty,
            element_count: array_size,
        };
        let entry = self.function.entry();
        self.function.block_mut(entry).instructions.insert(0, instr);
        Value::register(id, result_ty)
    }

    fn store(&mut self, value: Value, pointer: Value) {
        self.push(Instruction::Store { value, pointer });
    }

    fn load(&mut self, pointer: Value, result_ty: MirType) -> Value {
        let id = self.new_value_id();
        self.push(Instruction::Load { result: id, result_ty: result_ty.clone(), pointer });
        Value::register(id, result_ty)
    }

    fn gep(&mut self, base: Value, index: Value, element_ty: MirType, aggregate_ty: MirType) -> Value {
        let id = self.new_value_id();
        let result_ty = MirType::pointer(element_ty.clone());
        self.push(Instruction::Gep {
            result: id,
            result_ty: result_ty.clone(),
            base,
            index,
            element_ty,
            aggregate_ty,
        });
        Value::register(id, result_ty)
    }

    /// Emits an alloca + store for each parameter, at the head of entry, and
    /// records its pointer under the parameter's symbol (spec.md §4.5:
    /// "Per-function lowering").
    fn bind_parameters(&mut self, param_syms: &[SymbolId]) {
        for (index, &sym_id) in param_syms.iter().enumerate() {
            let symbol = self.table.symbol(sym_id).clone();
            let ty = translate_type(symbol.value_type().expect("parameters are always Variable symbols"));
            let pointer = self.alloca(ty.clone());
            let arg = Value::argument(symbol.name.clone(), index, ty.clone());
            self.store(arg, pointer.clone());
            self.locals.insert(sym_id, Local { pointer, value_ty: ty });
        }
    }

    /// Closes out a function body that reached the end of its block without
    /// an explicit `return` (spec.md §4.5 step 3).
    ///
    /// `self.current` may be a join block (e.g. `if.merge`) that every arm
    /// of a preceding `if`/`else` already returned out of, and that
    /// therefore has no predecessor at all — reachable only by falling off
    /// the end of the source block, never by control flow. Such a block
    /// still needs a terminator to stay well-formed (spec.md §8 property 3),
    /// but raising `ReturnMissingValue` against it would be a false
    /// positive: every path the source program can actually take already
    /// returns a value.
    fn seal_fallthrough(&mut self, name: &str, return_type: &MirType, def_span: Span, is_main: bool) {
        if self.function.block(self.current).is_sealed() {
            return;
        }
        let reachable = self.current == self.function.entry() || self.block_has_predecessor(self.current);
        match (*return_type == MirType::Void, is_main, reachable) {
            (true, _, _) => self.function.block_mut(self.current).seal(Terminator::Return { value: None }),
            (false, true, _) => self
                .function
                .block_mut(self.current)
                .seal(Terminator::Return { value: Some(Value::int(0)) }),
            (false, false, true) => {
                self.diags.error(
                    DiagnosticCode::ReturnMissingValue,
                    def_span,
                    &[name, &return_type.to_string()],
                );
                let placeholder = zero_value(return_type);
                self.function.block_mut(self.current).seal(Terminator::Return { value: Some(placeholder) });
            }
            (false, false, false) => {
                let placeholder = zero_value(return_type);
                self.function.block_mut(self.current).seal(Terminator::Return { value: Some(placeholder) });
            }
        }
    }

    /// Whether any block in the function terminates by branching to
    /// `target` — i.e. whether `target` is reachable through normal control
    /// flow (as opposed to being appended to only because generation
    /// happened to leave `self.current` pointed at it).
    fn block_has_predecessor(&self, target: BasicBlockId) -> bool {
        self.function
            .blocks
            .iter()
            .any(|b| b.terminator.target_blocks().contains(&target))
    }

    fn lower_block_stmts(&mut self, block_id: StmtId) {
        for &stmt in &self.ast.block_stmts(block_id).to_vec() {
            self.lower_stmt(stmt);
        }
    }

    fn lower_stmt(&mut self, id: StmtId) {
        let stmt = self.ast.stmt(id).clone();
        match stmt.kind {
            StmtKind::VarDecl { init, .. } => self.lower_var_decl(id, init),
            StmtKind::ArrayDecl { .. } => self.lower_array_decl(id),
            StmtKind::Assignment { value, .. } => self.lower_assignment(id, value),
            StmtKind::If { cond, then_block, else_block } => self.lower_if(cond, then_block, else_block),
            StmtKind::For { cond, body } => self.lower_for(cond, body),
            StmtKind::Return { value } => self.lower_return(value),
            StmtKind::ExprStatement { value } => {
                if let Some(v) = value {
                    self.lower_expr(v);
                }
            }
            StmtKind::Block(stmts) => {
                for s in stmts {
                    self.lower_stmt(s);
                }
            }
            StmtKind::FunctionDef { .. } => {
                self.diags.compiler_internal(DiagnosticCode::StmtVisitCouldNotCast, &[]);
            }
        }
    }

    fn lower_var_decl(&mut self, id: StmtId, init: Option<ExprId>) {
        let Some(sym_id) = self.ann.stmt_symbol(id) else {
            self.diags.compiler_internal(DiagnosticCode::StmtVisitCouldNotCast, &[]);
            return;
        };
        let ty = translate_type(self.table.symbol(sym_id).value_type().expect("VarDecl symbols are Variable"));
        let pointer = self.alloca(ty.clone());
        self.locals.insert(sym_id, Local { pointer: pointer.clone(), value_ty: ty.clone() });

        let Some(init_id) = init else { return };
        match &self.ast.expr(init_id).kind {
            ExprKind::ArrayLiteral(elems) => {
                let MirType::Array { element, .. } = &ty else {
                    // The analyzer only accepts an array-literal initializer
                    // against an array-typed declaration (spec.md §9 Open
                    // Question); anything else is a generator bug.
                    self.diags.compiler_internal(DiagnosticCode::ExprVisitCouldNotCast, &[]);
                    return;
                };
                let element_ty = (**element).clone();
                for (i, elem_id) in elems.clone().into_iter().enumerate() {
                    let elem_val = self.lower_expr(elem_id);
                    let idx = Value::int(i as i64);
                    let slot = self.gep(pointer.clone(), idx, element_ty.clone(), ty.clone());
                    self.store(elem_val, slot);
                }
            }
            _ => {
                let val = self.lower_expr(init_id);
                self.store(val, pointer);
            }
        }
    }

    fn lower_array_decl(&mut self, id: StmtId) {
        let Some(sym_id) = self.ann.stmt_symbol(id) else {
            self.diags.compiler_internal(DiagnosticCode::StmtVisitCouldNotCast, &[]);
            return;
        };
        let ty = translate_type(self.table.symbol(sym_id).value_type().expect("ArrayDecl symbols are Array"));
        let pointer = self.alloca(ty.clone());
        self.locals.insert(sym_id, Local { pointer, value_ty: ty });
    }

    fn lower_assignment(&mut self, id: StmtId, value: ExprId) {
        let val = self.lower_expr(value);
        let Some(sym_id) = self.ann.stmt_symbol(id) else {
            self.diags.compiler_internal(DiagnosticCode::StmtVisitCouldNotCast, &[]);
            return;
        };
        let Some(local) = self.locals.get(&sym_id).cloned() else {
            self.diags.compiler_internal(DiagnosticCode::StmtVisitCouldNotCast, &[]);
            return;
        };
        self.store(val, local.pointer);
    }

    fn lower_if(&mut self, cond: ExprId, then_block: StmtId, else_block: Option<StmtId>) {
        let cond_val = self.lower_expr(cond);
        let then_id = self.function.push_block("if.then");
        let else_id = self.function.push_block("if.else");
        let merge_id = self.function.push_block("if.merge");

        self.function.block_mut(self.current).seal(Terminator::CondBranch {
            condition: cond_val,
            then_block: then_id,
            else_block: else_id,
        });

        self.current = then_id;
        self.lower_block_stmts(then_block);
        if !self.function.block(self.current).is_sealed() {
            self.function.block_mut(self.current).seal(Terminator::Branch { target: merge_id });
        }

        self.current = else_id;
        if let Some(else_block) = else_block {
            self.lower_block_stmts(else_block);
        }
        if !self.function.block(self.current).is_sealed() {
            self.function.block_mut(self.current).seal(Terminator::Branch { target: merge_id });
        }

        self.current = merge_id;
    }

    fn lower_for(&mut self, cond: ExprId, body: StmtId) {
        let cond_id = self.function.push_block("for.cond");
        let body_id = self.function.push_block("for.body");
        let end_id = self.function.push_block("for.end");

        self.function.block_mut(self.current).seal(Terminator::Branch { target: cond_id });

        self.current = cond_id;
        let cond_val = self.lower_expr(cond);
        self.function.block_mut(self.current).seal(Terminator::CondBranch {
            condition: cond_val,
            then_block: body_id,
            else_block: end_id,
        });

        self.current = body_id;
        self.lower_block_stmts(body);
        if !self.function.block(self.current).is_sealed() {
            self.function.block_mut(self.current).seal(Terminator::Branch { target: cond_id });
        }

        self.current = end_id;
    }

    fn lower_return(&mut self, value: Option<ExprId>) {
        let val = value.map(|v| self.lower_expr(v));
        self.function.block_mut(self.current).seal(Terminator::Return { value: val });
    }

    fn lower_expr(&mut self, id: ExprId) -> Value {
        let expr = self.ast.expr(id).clone();
        match expr.kind {
            ExprKind::IntLiteral(v) => Value::int(v),
            ExprKind::DecLiteral(v) => Value::float(v),
            ExprKind::ArrayLiteral(_) => {
                // Array literals are only meaningful as a `VarDecl`
                // initializer (spec.md §9 Open Question); reaching here
                // means one escaped into a general expression position.
                self.diags.compiler_internal(DiagnosticCode::ExprVisitCouldNotCast, &[]);
                Value::Literal { ty: MirType::Void, text: "undef".to_string() }
            }
            ExprKind::NameRef(_) => self.lower_name_ref(id),
            ExprKind::ArrayRef { index, .. } => self.lower_array_ref(id, index),
            ExprKind::Binary { op, lhs, rhs } => self.lower_binary(&op, lhs, rhs),
            ExprKind::Call { callee, args } => self.lower_call(id, expr.span, &callee, args),
            ExprKind::Cast { inner, .. } => self.lower_cast(id, inner),
        }
    }

    fn lower_name_ref(&mut self, id: ExprId) -> Value {
        let Some(sym_id) = self.ann.expr_symbol(id) else {
            self.diags.compiler_internal(DiagnosticCode::ExprVisitCouldNotCast, &[]);
            return Value::int(0);
        };
        let Some(local) = self.locals.get(&sym_id).cloned() else {
            self.diags.compiler_internal(DiagnosticCode::ExprVisitCouldNotCast, &[]);
            return Value::int(0);
        };
        self.load(local.pointer, local.value_ty)
    }

    fn lower_array_ref(&mut self, id: ExprId, index: ExprId) -> Value {
        let idx_val = self.lower_expr(index);
        let Some(sym_id) = self.ann.expr_symbol(id) else {
            self.diags.compiler_internal(DiagnosticCode::ExprVisitCouldNotCast, &[]);
            return Value::int(0);
        };
        let Some(local) = self.locals.get(&sym_id).cloned() else {
            self.diags.compiler_internal(DiagnosticCode::ExprVisitCouldNotCast, &[]);
            return Value::int(0);
        };
        let MirType::Array { element, .. } = &local.value_ty else {
            self.diags.compiler_internal(DiagnosticCode::ExprVisitCouldNotCast, &[]);
            return Value::int(0);
        };
        let element_ty = (**element).clone();
        let slot = self.gep(local.pointer, idx_val, element_ty.clone(), local.value_ty.clone());
        self.load(slot, element_ty)
    }

    fn lower_binary(&mut self, op: &str, lhs: ExprId, rhs: ExprId) -> Value {
        let lhs_val = self.lower_expr(lhs);
        let rhs_val = self.lower_expr(rhs);
        let operand_ty = lhs_val.ty().clone();
        let is_float = operand_ty.is_float();
        let opcode = if is_float { BinOpcode::float(op) } else { BinOpcode::integer(op) };
        let result_ty = if opcode.is_comparison() { MirType::Bool } else { operand_ty };
        let result = self.new_value_id();
        self.push(Instruction::Binary { result, op: opcode, result_ty: result_ty.clone(), lhs: lhs_val, rhs: rhs_val });
        Value::register(result, result_ty)
    }

    fn lower_call(&mut self, id: ExprId, span: Span, callee: &str, args: Vec<ExprId>) -> Value {
        match callee {
            "print" => self.lower_print(args),
            "input" => self.lower_input(span, args),
            _ => self.lower_user_call(id, callee, args),
        }
    }

    /// Synthesizes `printf`'s format string per spec.md §4.5: `%d` for
    /// 32-bit-or-narrower integers, `%lld` for 64-bit `int`, `%f` for either
    /// float width, and a trailing newline.
    fn lower_print(&mut self, args: Vec<ExprId>) -> Value {
        let arg_vals: Vec<Value> = args.into_iter().map(|a| self.lower_expr(a)).collect();
        let mut fmt = String::new();
        for v in &arg_vals {
            fmt.push_str(format_specifier(v.ty()));
        }
        fmt.push('\n');
        let mut call_args = vec![string_literal(&fmt)];
        call_args.extend(arg_vals);
        self.push(Instruction::Call {
            result: None,
            result_ty: MirType::Void,
            callee: SmolStr::new("printf"),
            args: call_args,
        });
        Value::Literal { ty: MirType::Void, text: String::new() }
    }

    /// `input` lowers to `scanf`, passing the target variable's pointer
    /// directly rather than a loaded value (spec.md §4.5). Its single
    /// argument must be a variable reference; that contract is enforced
    /// here rather than in semantic analysis (`SPEC_FULL.md` §4.4).
    fn lower_input(&mut self, span: Span, args: Vec<ExprId>) -> Value {
        let is_single_name_ref = args.len() == 1 && matches!(self.ast.expr(args[0]).kind, ExprKind::NameRef(_));
        if !is_single_name_ref {
            self.diags.error(DiagnosticCode::InputArgNotVariable, span, &[]);
            return Value::Literal { ty: MirType::Void, text: String::new() };
        }

        let arg_id = args[0];
        let Some(sym_id) = self.ann.expr_symbol(arg_id) else {
            self.diags.compiler_internal(DiagnosticCode::ExprVisitCouldNotCast, &[]);
            return Value::Literal { ty: MirType::Void, text: String::new() };
        };
        let Some(local) = self.locals.get(&sym_id).cloned() else {
            self.diags.compiler_internal(DiagnosticCode::ExprVisitCouldNotCast, &[]);
            return Value::Literal { ty: MirType::Void, text: String::new() };
        };

        let fmt = format_specifier(&local.value_ty).to_string();
        self.push(Instruction::Call {
            result: None,
            result_ty: MirType::Void,
            callee: SmolStr::new("scanf"),
            args: vec![string_literal(&fmt), local.pointer],
        });
        Value::Literal { ty: MirType::Void, text: String::new() }
    }

    fn lower_user_call(&mut self, id: ExprId, callee: &str, args: Vec<ExprId>) -> Value {
        let Some(sym_id) = self.ann.expr_symbol(id) else {
            self.diags.compiler_internal(DiagnosticCode::ExprVisitCouldNotCast, &[]);
            return Value::int(0);
        };
        let symbol = self.table.symbol(sym_id).clone();
        let SymbolKind::Function { return_type, .. } = &symbol.kind else {
            self.diags.compiler_internal(DiagnosticCode::ExprVisitCouldNotCast, &[]);
            return Value::int(0);
        };
        let result_ty = translate_type(return_type);
        let arg_vals: Vec<Value> = args.into_iter().map(|a| self.lower_expr(a)).collect();

        if result_ty == MirType::Void {
            self.push(Instruction::Call {
                result: None,
                result_ty: MirType::Void,
                callee: SmolStr::new(callee),
                args: arg_vals,
            });
            Value::Literal { ty: MirType::Void, text: String::new() }
        } else {
            let result = self.new_value_id();
            self.push(Instruction::Call {
                result: Some(result),
                result_ty: result_ty.clone(),
                callee: SmolStr::new(callee),
                args: arg_vals,
            });
            Value::register(result, result_ty)
        }
    }

    fn lower_cast(&mut self, id: ExprId, inner: ExprId) -> Value {
        let inner_val = self.lower_expr(inner);
        let source_ty = inner_val.ty().clone();
        let Some(target_source_ty) = self.ann.expr_type(id) else {
            self.diags.compiler_internal(DiagnosticCode::CastNodeTypeNull, &[]);
            return inner_val;
        };
        let target_ty = translate_type(target_source_ty);
        let Some(kind) = cast_kind(&source_ty, &target_ty) else {
            self.diags.compiler_internal(DiagnosticCode::ExprVisitCouldNotCast, &[]);
            return inner_val;
        };
        let result = self.new_value_id();
        self.push(Instruction::Cast { result, kind, result_ty: target_ty.clone(), operand: inner_val });
        Value::register(result, target_ty)
    }
}

/// Picks the MIR `Cast` sub-kind for a (source, target) type pair, per
/// spec.md §4.5.
fn cast_kind(source: &MirType, target: &MirType) -> Option<CastKind> {
    match (source.is_integer(), source.is_float(), source.is_pointer(), target.is_integer(), target.is_float(), target.is_pointer()) {
        (true, _, _, _, true, _) => Some(CastKind::SIToFP),
        (_, true, _, true, _, _) => Some(CastKind::FPToSI),
        (true, _, _, true, _, _) => Some(CastKind::IntCast),
        (_, true, _, _, true, _) => Some(CastKind::FPCast),
        (_, _, true, true, _, _) => Some(CastKind::PtrToInt),
        (true, _, _, _, _, true) => Some(CastKind::IntToPtr),
        (_, _, true, _, _, true) => Some(CastKind::PtrCast),
        _ => None,
    }
}

/// spec.md §4.5: `%d` for `i32`, `%lld` for 64-bit `int`, `%f` for either
/// float width. Narrower integer types (`char`, `bool`) are promoted to
/// `%d` the way C's default argument promotion would.
fn format_specifier(ty: &MirType) -> &'static str {
    match ty {
        MirType::Int64 => "%lld",
        MirType::Int32 | MirType::Char8 | MirType::Bool => "%d",
        MirType::Float64 | MirType::Float32 => "%f",
        _ => "%d",
    }
}

fn string_literal(text: &str) -> Value {
    Value::Literal { ty: MirType::pointer(MirType::Char8), text: format!("{text:?}") }
}

fn zero_value(ty: &MirType) -> Value {
    match ty {
        MirType::Int64 => Value::int(0),
        MirType::Int32 => Value::i32(0),
        MirType::Char8 => Value::Literal { ty: MirType::Char8, text: "0".to_string() },
        MirType::Float64 => Value::float(0.0),
        MirType::Float32 => Value::f32(0.0),
        MirType::Bool => Value::boolean(false),
        MirType::Void => Value::Literal { ty: MirType::Void, text: String::new() },
        other => Value::Literal { ty: other.clone(), text: "zeroinitializer".to_string() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalarc_semantic::analyze;
    use scalarc_syntax::parser::parse;
    use crate::PrettyPrint;

    fn build(source: &str) -> (MirModule, DiagnosticSink) {
        let ast = parse(source).expect("test sources parse");
        let mut diags = DiagnosticSink::new();
        let analysis = analyze(&ast, &mut diags);
        assert!(!diags.has_errors(), "unexpected semantic errors: {}", diags.summary());
        let module = generate(&ast, &analysis, &mut diags);
        (module, diags)
    }

    /// S1 — arithmetic and print (spec.md §8).
    #[test]
    fn s1_arithmetic_and_print() {
        let (module, _diags) = build("var x: int = 40 + 2; print(x);");
        let main = module.function("main").unwrap();
        assert!(main.is_well_formed());
        let entry = main.block(main.entry());
        assert!(entry.instructions.iter().any(|i| matches!(i, Instruction::Alloca { .. })));
        assert!(entry.instructions.iter().any(|i| matches!(i, Instruction::Store { .. })));
        assert!(entry.instructions.iter().any(|i| matches!(i, Instruction::Load { .. })));
        let call = entry
            .instructions
            .iter()
            .find_map(|i| match i {
                Instruction::Call { callee, args, .. } if callee == "printf" => Some(args),
                _ => None,
            })
            .expect("print lowers to a printf call");
        assert_eq!(call[0], Value::Literal { ty: MirType::pointer(MirType::Char8), text: "\"%lld\\n\"".to_string() });
        assert_eq!(entry.terminator, Terminator::Return { value: Some(Value::int(0)) });
    }

    /// S4 — if/else control flow (spec.md §8).
    #[test]
    fn s4_if_else_produces_four_named_blocks() {
        let (module, _) = build("var a: int = 1; if (a == 1) { a = 2; } else { a = 3; }");
        let main = module.function("main").unwrap();
        let names: Vec<&str> = main.blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["entry", "if.then", "if.else", "if.merge"]);
        assert!(matches!(main.block(main.entry()).terminator, Terminator::CondBranch { .. }));
    }

    /// S5 — function call (spec.md §8).
    #[test]
    fn s5_function_call_lowers_both_functions() {
        let (module, _) = build("fn sq(x: int): int { return x * x; } var v = sq(5);");
        assert!(module.function("sq").is_some());
        let main = module.function("main").unwrap();
        let entry = main.block(main.entry());
        assert!(entry.instructions.iter().any(|i| matches!(
            i,
            Instruction::Call { callee, .. } if callee == "sq"
        )));
        let sq = module.function("sq").unwrap();
        assert!(sq.is_well_formed());
    }

    /// S6 — for loop (spec.md §8).
    #[test]
    fn s6_for_loop_produces_the_expected_blocks() {
        let (module, _) = build("var i: int = 0; for (i < 3) { i = i + 1; }");
        let main = module.function("main").unwrap();
        let names: Vec<&str> = main.blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["entry", "for.cond", "for.body", "for.end"]);
        assert!(matches!(main.block(main.entry()).terminator, Terminator::Branch { .. }));
        assert!(matches!(main.blocks[BasicBlockId::new(1)].terminator, Terminator::CondBranch { .. }));
        assert!(matches!(main.blocks[BasicBlockId::new(2)].terminator, Terminator::Branch { .. }));
    }

    #[test]
    fn implicit_return_zero_is_added_to_main_without_an_explicit_return() {
        let (module, _) = build("var x: int = 1;");
        let main = module.function("main").unwrap();
        assert_eq!(main.block(main.entry()).terminator, Terminator::Return { value: Some(Value::int(0)) });
    }

    #[test]
    fn all_allocas_sit_in_the_prefix_of_the_entry_block() {
        let (module, _) = build("var a: int = 1; var b: int = a + 1;");
        let main = module.function("main").unwrap();
        let entry = main.block(main.entry());
        let mut seen_non_alloca = false;
        for instr in &entry.instructions {
            let is_alloca = matches!(instr, Instruction::Alloca { .. });
            if !is_alloca {
                seen_non_alloca = true;
            }
            assert!(!(is_alloca && seen_non_alloca), "an alloca appeared after a non-alloca instruction");
        }
    }

    #[test]
    fn array_literal_initializer_lowers_to_a_gep_and_store_per_element() {
        let (module, _) = build("var a: int[3] = [1, 2, 3];");
        let main = module.function("main").unwrap();
        let entry = main.block(main.entry());
        let gep_count = entry.instructions.iter().filter(|i| matches!(i, Instruction::Gep { .. })).count();
        assert_eq!(gep_count, 3);
    }

    #[test]
    fn input_requires_a_variable_argument() {
        let ast = parse("var x: int = 0; input(x + 1);").expect("parses");
        let mut diags = DiagnosticSink::new();
        let analysis = analyze(&ast, &mut diags);
        assert!(!diags.has_errors());
        let _ = generate(&ast, &analysis, &mut diags);
        assert!(diags.has_errors());
    }

    #[test]
    fn missing_return_in_non_void_function_is_reported_but_mir_stays_well_formed() {
        let ast = parse("fn f(): int { var x: int = 1; }").expect("parses");
        let mut diags = DiagnosticSink::new();
        let analysis = analyze(&ast, &mut diags);
        assert!(!diags.has_errors());
        let module = generate(&ast, &analysis, &mut diags);
        assert!(diags.has_errors());
        let f = module.function("f").unwrap();
        assert!(f.is_well_formed());
    }

    /// A function whose body is a single `if`/`else` with a `return` in
    /// every arm leaves `if.merge` unreachable. That must not raise
    /// `ReturnMissingValue` — every path the source program can actually
    /// take already returns a value.
    #[test]
    fn if_else_returning_on_every_arm_is_not_a_missing_return() {
        let ast = parse("fn f(c: bool): int { if (c) { return 1; } else { return 2; } }")
            .expect("parses");
        let mut diags = DiagnosticSink::new();
        let analysis = analyze(&ast, &mut diags);
        assert!(!diags.has_errors(), "unexpected: {}", diags.summary());
        let module = generate(&ast, &analysis, &mut diags);
        assert!(!diags.has_errors(), "unexpected: {}", diags.summary());
        let f = module.function("f").unwrap();
        assert!(f.is_well_formed());
    }

    #[test]
    fn dump_round_trips_through_pretty_print_without_panicking() {
        let (module, _) = build("var x: int = 1; print(x);");
        let text = module.pretty_print(0);
        assert!(text.contains("define int @main"));
    }
}
