use crate::Language;

/// Every diagnosable condition the analyzer and MIR generator can raise.
///
/// Grouped the way the reference error catalog groups them: declaration
/// errors, expression/call errors, assignment errors, control-flow errors,
/// reference errors, cast errors, one warning, and the compiler-internal
/// family that never reaches end users in a well-formed build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // --- declaration errors ---
    VarDeclSymbolAlreadyDefined,
    VarDeclCannotDeclareVoid,
    VarDeclTypeNotDefined,
    VarDeclInitTypeMismatch,
    VarDeclNoTypeAndInit,
    VarDeclCannotDetermineType,

    // --- expression / call errors ---
    BinaryOpOperandMismatch,
    ArrayLiteralElementTypeMismatch,
    ArrayIndexNotInteger,
    FuncCallNotDefined,
    FuncCallNotFuncCall,
    FuncCallArgSizeMismatch,
    FuncCallArgTypeMismatch,
    /// `input`'s single argument must be a variable reference, checked at
    /// MIR-lowering time rather than in the analyzer so the rule lives in
    /// one place.
    InputArgNotVariable,

    // --- assignment errors ---
    AssignmentNotDefined,
    AssignmentNotVariable,
    AssignmentTypeMismatch,

    // --- control-flow errors ---
    IfNotBool,
    ForNotBool,
    ReturnOutsideFunction,
    ReturnMissingValue,
    ReturnValueInVoidFunction,
    ReturnTypeMismatch,

    // --- reference errors ---
    VarRefNotDefined,
    VarRefNotVariable,
    ArrayRefNotArray,

    // --- cast errors ---
    CastToNonBasic,
    CastInvalidType,

    // --- warnings ---
    ExprStmtNoExpr,

    // --- compiler-internal ---
    LeaveScopeEmptyStack,
    AddSymbolNoScope,
    ExprVisitCouldNotCast,
    StmtVisitCouldNotCast,
    CastNodeTypeNull,

    /// Used only by `DiagnosticSink::report_raw`: the diagnostic's text was
    /// already fully formatted by the caller rather than selected from this
    /// catalog, so this code's own template is a plain passthrough and is
    /// never substituted against.
    Raw,
}

impl DiagnosticCode {
    pub fn template(self, language: Language) -> &'static str {
        use DiagnosticCode::*;
        use Language::*;
        match (self, language) {
            (VarDeclSymbolAlreadyDefined, En) => "Symbol '%0' is already defined in this scope.",
            (VarDeclSymbolAlreadyDefined, Ja) => "シンボル '%0' はこのスコープですでに定義されています。",

            (VarDeclCannotDeclareVoid, En) => "Variable '%0' cannot be declared with type 'void'.",
            (VarDeclCannotDeclareVoid, Ja) => "変数 '%0' を 'void' 型で宣言することはできません。",

            (VarDeclTypeNotDefined, En) => "Type '%0' is not defined.",
            (VarDeclTypeNotDefined, Ja) => "型 '%0' は定義されていません。",

            (VarDeclInitTypeMismatch, En) => {
                "Cannot initialize variable '%0' of type '%1' with a value of type '%2'."
            }
            (VarDeclInitTypeMismatch, Ja) => {
                "型 '%1' の変数 '%0' を型 '%2' の値で初期化することはできません。"
            }

            (VarDeclNoTypeAndInit, En) => {
                "Variable '%0' must have either an explicit type or an initializer."
            }
            (VarDeclNoTypeAndInit, Ja) => {
                "変数 '%0' には明示的な型または初期化子のいずれかが必要です。"
            }

            (VarDeclCannotDetermineType, En) => "Cannot determine the type of variable '%0'.",
            (VarDeclCannotDetermineType, Ja) => "変数 '%0' の型を決定できません。",

            (BinaryOpOperandMismatch, En) => {
                "The '%0' operator cannot be used with different types ('%1', '%2')."
            }
            (BinaryOpOperandMismatch, Ja) => {
                "演算子 '%0' は異なる型('%1', '%2') で行うことはできません。"
            }

            (ArrayLiteralElementTypeMismatch, En) => {
                "Array literal elements must share one type; found '%0' and '%1'."
            }
            (ArrayLiteralElementTypeMismatch, Ja) => {
                "配列リテラルの要素は同じ型でなければなりません。'%0' と '%1' が見つかりました。"
            }

            (ArrayIndexNotInteger, En) => "Array '%0' must be indexed with an integer, found type '%1'.",
            (ArrayIndexNotInteger, Ja) => "配列 '%0' は整数でインデックスを指定する必要がありますが、型 '%1' が見つかりました。",

            (FuncCallNotDefined, En) => "Function '%0' is not defined.",
            (FuncCallNotDefined, Ja) => "関数 '%0' は定義されていません。",

            (FuncCallNotFuncCall, En) => "Symbol '%0' is not a function.",
            (FuncCallNotFuncCall, Ja) => "シンボル '%0' は関数ではありません。",

            (FuncCallArgSizeMismatch, En) => {
                "Function '%0' expects %1 arguments, but %2 were provided."
            }
            (FuncCallArgSizeMismatch, Ja) => {
                "関数 '%0' は %1 個の引数を期待していますが、%2 個が提供されました。"
            }

            (FuncCallArgTypeMismatch, En) => {
                "Argument %0 of function '%1' expects type '%2', but '%3' was provided."
            }
            (FuncCallArgTypeMismatch, Ja) => {
                "関数 '%1' の引数 %0 は型 '%2' を期待していますが、'%3' が提供されました。"
            }

            (InputArgNotVariable, En) => "The argument to 'input' must be a variable reference.",
            (InputArgNotVariable, Ja) => "'input' の引数は変数参照でなければなりません。",

            (AssignmentNotDefined, En) => "Symbol '%0' is not defined.",
            (AssignmentNotDefined, Ja) => "シンボル '%0' は定義されていません。",

            (AssignmentNotVariable, En) => "Symbol '%0' is not a variable and cannot be assigned to.",
            (AssignmentNotVariable, Ja) => "シンボル '%0' は変数ではないため、代入できません。",

            (AssignmentTypeMismatch, En) => {
                "Cannot assign a value of type '%1' to variable '%0' of type '%2'."
            }
            (AssignmentTypeMismatch, Ja) => {
                "型 '%2' の変数 '%0' に型 '%1' の値を代入することはできません。"
            }

            (IfNotBool, En) => "The condition of an 'if' statement must be of type 'bool'.",
            (IfNotBool, Ja) => "'if' 文の条件は 'bool' 型でなければなりません。",

            (ForNotBool, En) => "The condition of a 'for' statement must be of type 'bool'.",
            (ForNotBool, Ja) => "'for' 文の条件は 'bool' 型でなければなりません。",

            (ReturnOutsideFunction, En) => "'return' cannot appear outside of a function body.",
            (ReturnOutsideFunction, Ja) => "'return' は関数本体の外では使用できません。",

            (ReturnMissingValue, En) => "Function '%0' returns '%1' and must return a value.",
            (ReturnMissingValue, Ja) => "関数 '%0' は '%1' を返すため、値を返す必要があります。",

            (ReturnValueInVoidFunction, En) => "Function '%0' returns 'void' and cannot return a value.",
            (ReturnValueInVoidFunction, Ja) => "関数 '%0' は 'void' を返すため、値を返すことはできません。",

            (ReturnTypeMismatch, En) => {
                "Function '%0' must return a value of type '%1', but found type '%2'."
            }
            (ReturnTypeMismatch, Ja) => {
                "関数 '%0' は型 '%1' の値を返す必要がありますが、型 '%2' が見つかりました。"
            }

            (VarRefNotDefined, En) => "Variable '%0' is not defined.",
            (VarRefNotDefined, Ja) => "変数 '%0' は定義されていません。",

            (VarRefNotVariable, En) => "Symbol '%0' is not a variable.",
            (VarRefNotVariable, Ja) => "シンボル '%0' は変数ではありません。",

            (ArrayRefNotArray, En) => "Symbol '%0' is not an array.",
            (ArrayRefNotArray, Ja) => "シンボル '%0' は配列ではありません。",

            (CastToNonBasic, En) => "Cannot cast a value to the non-basic type '%0'.",
            (CastToNonBasic, Ja) => "値を非基本型 '%0' にキャストすることはできません。",

            (CastInvalidType, En) => "Cannot cast a value of type '%0' to type '%1'.",
            (CastInvalidType, Ja) => "型 '%0' の値を型 '%1' にキャストすることはできません。",

            (ExprStmtNoExpr, En) => "There is no expression in the expression statement.",
            (ExprStmtNoExpr, Ja) => "式文に式がありません。",

            (LeaveScopeEmptyStack, En) => "attempting to leave a scope with an empty scope stack.",
            (LeaveScopeEmptyStack, Ja) => "スコープスタックが空の状態でスコープを抜けようとしています。",

            (AddSymbolNoScope, En) => "attempting to add a symbol without a scope.",
            (AddSymbolNoScope, Ja) => "スコープが存在しない状態で記号を追加しようとしています。",

            (ExprVisitCouldNotCast, En) => "could not cast a node to the expected expression type during traversal.",
            (ExprVisitCouldNotCast, Ja) => "走査中にノードを期待される式の型にキャストできませんでした。",

            (StmtVisitCouldNotCast, En) => "could not cast a node to the expected statement type during traversal.",
            (StmtVisitCouldNotCast, Ja) => "走査中にノードを期待される文の型にキャストできませんでした。",

            (CastNodeTypeNull, En) => "a cast node is missing its resolved target type.",
            (CastNodeTypeNull, Ja) => "キャストノードに解決済みの対象型がありません。",

            (Raw, _) => "%0",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_has_an_english_and_japanese_template() {
        let codes = [
            DiagnosticCode::VarDeclSymbolAlreadyDefined,
            DiagnosticCode::VarDeclCannotDeclareVoid,
            DiagnosticCode::VarDeclTypeNotDefined,
            DiagnosticCode::VarDeclInitTypeMismatch,
            DiagnosticCode::VarDeclNoTypeAndInit,
            DiagnosticCode::VarDeclCannotDetermineType,
            DiagnosticCode::BinaryOpOperandMismatch,
            DiagnosticCode::ArrayLiteralElementTypeMismatch,
            DiagnosticCode::ArrayIndexNotInteger,
            DiagnosticCode::FuncCallNotDefined,
            DiagnosticCode::FuncCallNotFuncCall,
            DiagnosticCode::FuncCallArgSizeMismatch,
            DiagnosticCode::FuncCallArgTypeMismatch,
            DiagnosticCode::InputArgNotVariable,
            DiagnosticCode::AssignmentNotDefined,
            DiagnosticCode::AssignmentNotVariable,
            DiagnosticCode::AssignmentTypeMismatch,
            DiagnosticCode::IfNotBool,
            DiagnosticCode::ForNotBool,
            DiagnosticCode::ReturnOutsideFunction,
            DiagnosticCode::ReturnMissingValue,
            DiagnosticCode::ReturnValueInVoidFunction,
            DiagnosticCode::ReturnTypeMismatch,
            DiagnosticCode::VarRefNotDefined,
            DiagnosticCode::VarRefNotVariable,
            DiagnosticCode::ArrayRefNotArray,
            DiagnosticCode::CastToNonBasic,
            DiagnosticCode::CastInvalidType,
            DiagnosticCode::ExprStmtNoExpr,
            DiagnosticCode::LeaveScopeEmptyStack,
            DiagnosticCode::AddSymbolNoScope,
            DiagnosticCode::ExprVisitCouldNotCast,
            DiagnosticCode::StmtVisitCouldNotCast,
            DiagnosticCode::CastNodeTypeNull,
            DiagnosticCode::Raw,
        ];
        for code in codes {
            assert!(!code.template(Language::En).is_empty());
            assert!(!code.template(Language::Ja).is_empty());
        }
    }
}
