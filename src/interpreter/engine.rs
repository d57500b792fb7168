//! Core interpreter engine
//!
//! [`Interpreter`] owns the variable environment and walks the AST directly.
//! Statement execution lives here; expression evaluation and the operator
//! helpers live in the sibling `expressions` and `ops` impl blocks.

use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::memory::Environment;
use crate::parser::ast::{AstNode, Program, SourceLocation};
use crate::trace::{TraceEvent, TraceSink};

/// What a read of an unbound name does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndefinedPolicy {
    /// Reading an unbound name is an error.
    #[default]
    Strict,
    /// Reading an unbound name binds it to integer 0 first.
    Permissive,
}

/// Tree-walking interpreter over a single flat environment.
pub struct Interpreter {
    env: Environment,
    policy: UndefinedPolicy,
    tracer: Option<Box<dyn TraceSink>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_env(Environment::default())
    }

    /// Start from pre-seeded bindings.
    pub fn with_env(env: Environment) -> Self {
        Self {
            env,
            policy: UndefinedPolicy::Strict,
            tracer: None,
        }
    }

    pub fn with_policy(mut self, policy: UndefinedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Install an execution trace sink. Replaces any previous sink.
    pub fn set_tracer(&mut self, tracer: Box<dyn TraceSink>) {
        self.tracer = Some(tracer);
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Consume the interpreter, yielding the final environment.
    pub fn into_env(self) -> Environment {
        self.env
    }

    /// Execute every statement in order. The program's value is the value of
    /// its last statement, or integer 0 for an empty program.
    pub fn run(&mut self, program: &Program) -> Result<Value, RuntimeError> {
        let mut last = Value::Int(0);

        for (index, statement) in program.statements.iter().enumerate() {
            last = self.execute_statement(statement)?;
            self.trace(TraceEvent::Statement {
                index,
                value: last.clone(),
            });
        }

        Ok(last)
    }

    /// Execute one statement, producing its value.
    pub(crate) fn execute_statement(&mut self, statement: &AstNode) -> Result<Value, RuntimeError> {
        match statement {
            AstNode::Declaration { declarators, .. } => {
                // The declaration's value is the last initializer's value,
                // or 0 when the final declarator is bare.
                let mut value = Value::Int(0);
                for declarator in declarators {
                    match &declarator.init {
                        Some(init) => {
                            value = self.evaluate_expr(init)?;
                            self.bind(&declarator.name, value.clone());
                        }
                        None => {
                            // A bare declarator never clobbers an existing
                            // binding of the same name.
                            value = Value::Int(0);
                            if !self.env.contains_key(&declarator.name) {
                                self.bind(&declarator.name, Value::Int(0));
                            }
                        }
                    }
                }
                Ok(value)
            }
            AstNode::ExpressionStatement { expr, .. } => self.evaluate_expr(expr),
            AstNode::EmptyStatement { .. } => Ok(Value::Int(0)),
            expr => self.evaluate_expr(expr),
        }
    }

    /// Read a variable, honoring the undefined-name policy.
    pub(crate) fn lookup(
        &mut self,
        name: &str,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        if let Some(value) = self.env.get(name) {
            return Ok(value.clone());
        }

        match self.policy {
            UndefinedPolicy::Strict => Err(RuntimeError::UndefinedVariable {
                name: name.to_string(),
                location,
            }),
            UndefinedPolicy::Permissive => {
                self.bind(name, Value::Int(0));
                Ok(Value::Int(0))
            }
        }
    }

    /// Write a variable and record the event.
    pub(crate) fn bind(&mut self, name: &str, value: Value) {
        self.env.insert(name.to_string(), value.clone());
        self.trace(TraceEvent::Assignment {
            name: name.to_string(),
            value,
        });
    }

    pub(crate) fn trace(&mut self, event: TraceEvent) {
        if let Some(tracer) = &mut self.tracer {
            tracer.record(event);
        }
    }
}
