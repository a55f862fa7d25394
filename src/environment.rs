use crate::value::Value;
use log::debug;
use std::collections::HashMap;

/// One binding table.  `parent` indexes the enclosing scope in the arena.
#[derive(Debug, Clone, Default)]
struct Scope {
    values: HashMap<String, Value>,
    parent: Option<usize>,
}

/// Arena of lexical scopes addressed by index, with a cursor on the current
/// one.  Blocks nest strictly, so a child is always the last slot and `pop`
/// can drop it outright.
#[derive(Debug, Clone)]
pub struct Environment {
    scopes: Vec<Scope>,
    current: usize,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// An environment holding only the root scope.
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::default()],
            current: 0,
        }
    }

    /// Enter a fresh child of the current scope.
    pub fn push(&mut self) {
        self.scopes.push(Scope {
            values: HashMap::new(),
            parent: Some(self.current),
        });
        self.current = self.scopes.len() - 1;

        debug!("Entered scope depth {}", self.depth());
    }

    /// Discard the current scope and its bindings, making its parent current.
    /// The root scope is never popped.
    pub fn pop(&mut self) {
        if let Some(parent) = self.scopes[self.current].parent {
            self.scopes.truncate(self.current);
            self.current = parent;

            debug!("Left scope, back to depth {}", self.depth());
        }
    }

    /// Number of scopes on the chain, root included.
    pub fn depth(&self) -> usize {
        self.chain().count()
    }

    /// Bind `name` in the current scope, shadowing any outer binding.
    pub fn define(&mut self, name: &str, value: Value) {
        self.scopes[self.current]
            .values
            .insert(name.to_string(), value);
    }

    /// Innermost binding of `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.chain().find_map(|scope| scope.values.get(name))
    }

    /// Overwrite the innermost existing binding of `name`.  Returns `false`
    /// when no scope on the chain declares it; nothing is bound in that case.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        let mut index: Option<usize> = Some(self.current);

        while let Some(i) = index {
            let scope: &mut Scope = &mut self.scopes[i];

            if let Some(slot) = scope.values.get_mut(name) {
                *slot = value;
                return true;
            }

            index = scope.parent;
        }

        false
    }

    /// Scopes from innermost to root.
    fn chain(&self) -> impl Iterator<Item = &Scope> + '_ {
        std::iter::successors(Some(&self.scopes[self.current]), move |scope| {
            scope.parent.map(|i| &self.scopes[i])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_definition_shadows_without_mutating_outer() {
        let mut env = Environment::new();
        env.define("x", Value::Int(1));

        env.push();
        env.define("x", Value::Int(2));
        assert_eq!(env.get("x"), Some(&Value::Int(2)));

        env.pop();
        assert_eq!(env.get("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn assign_walks_outward() {
        let mut env = Environment::new();
        env.define("x", Value::Int(1));

        env.push();
        assert!(env.assign("x", Value::Int(5)));
        env.pop();

        assert_eq!(env.get("x"), Some(&Value::Int(5)));
    }

    #[test]
    fn assign_to_undeclared_binds_nothing() {
        let mut env = Environment::new();

        assert!(!env.assign("ghost", Value::Int(1)));
        assert_eq!(env.get("ghost"), None);
    }

    #[test]
    fn popped_bindings_are_gone() {
        let mut env = Environment::new();

        env.push();
        env.define("tmp", Value::Bool(true));
        env.pop();
        assert_eq!(env.get("tmp"), None);

        env.push();
        assert_eq!(env.get("tmp"), None);
        assert_eq!(env.depth(), 2);
    }

    #[test]
    fn root_is_never_popped() {
        let mut env = Environment::new();
        env.define("x", Value::Int(1));

        env.pop();

        assert_eq!(env.depth(), 1);
        assert_eq!(env.get("x"), Some(&Value::Int(1)));
    }
}
