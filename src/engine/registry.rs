// ============================================================================
// Operation Registry
// Maps stable symbols and names to shared operation instances
// ============================================================================

use crate::domain::StackItem;
use crate::interfaces::Operation;
use crate::operations::{arithmetic_operations, financial_operations, scientific_operations};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Lookup table from symbol (`"/"`) and name (`"DIVIDE"`) to operation.
///
/// Adding a formula means registering one more value; the evaluator never
/// changes.
#[derive(Default, Clone)]
pub struct OperationRegistry {
    by_key: HashMap<String, Arc<dyn Operation>>,
    operations: Vec<Arc<dyn Operation>>,
}

impl OperationRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in operation
    ///
    /// # Example
    /// ```
    /// use rpn_engine::engine::OperationRegistry;
    ///
    /// let registry = OperationRegistry::standard().unwrap();
    /// assert_eq!(registry.get("/").map(|op| op.name()), Some("DIVIDE"));
    /// assert_eq!(registry.get("divide").map(|op| op.symbol()), Some("/"));
    /// ```
    pub fn standard() -> Result<Self, String> {
        RegistryBuilder::standard().build()
    }

    /// Register an operation under its symbol and its name.
    ///
    /// Fails without modifying the registry if either key is taken.
    pub fn register(&mut self, operation: Arc<dyn Operation>) -> Result<(), String> {
        let info = operation.info();
        if info.operands.len() != info.arity {
            return Err(format!(
                "Operation {} declares arity {} but describes {} operands",
                info.symbol,
                info.arity,
                info.operands.len()
            ));
        }

        let mut keys = vec![info.symbol.to_string(), info.name.to_ascii_uppercase()];
        keys.dedup();

        if let Some(taken) = keys.iter().find(|key| self.by_key.contains_key(*key)) {
            return Err(format!("Operation key already registered: {}", taken));
        }

        for key in keys {
            self.by_key.insert(key, Arc::clone(&operation));
        }
        tracing::trace!(symbol = info.symbol, name = info.name, "operation registered");
        self.operations.push(operation);
        Ok(())
    }

    /// Look up by exact symbol, then by case-insensitive name.
    pub fn get(&self, key: &str) -> Option<Arc<dyn Operation>> {
        self.by_key
            .get(key)
            .or_else(|| self.by_key.get(&key.to_ascii_uppercase()))
            .cloned()
    }

    /// Program item referencing the operation registered under `key`.
    pub fn item(&self, key: &str) -> Option<StackItem> {
        self.get(key).map(StackItem::Operation)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Operations in registration order
    pub fn operations(&self) -> impl Iterator<Item = &Arc<dyn Operation>> {
        self.operations.iter()
    }

    /// Display symbols in registration order
    pub fn symbols(&self) -> Vec<&'static str> {
        self.operations.iter().map(|op| op.symbol()).collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Process-lifetime registry of the built-in operations.
///
/// Built without failing: a built-in rejected by [`OperationRegistry::register`]
/// is logged and left out.
pub fn standard_registry() -> &'static OperationRegistry {
    static STANDARD: OnceLock<OperationRegistry> = OnceLock::new();
    STANDARD.get_or_init(|| RegistryBuilder::standard().build_skipping_rejected())
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for assembling a registry with a fluent API
///
/// # Example
/// ```
/// use rpn_engine::engine::RegistryBuilder;
///
/// let registry = RegistryBuilder::new()
///     .with_arithmetic()
///     .with_financial()
///     .build()
///     .unwrap();
///
/// assert!(registry.contains("PMT"));
/// assert!(!registry.contains("SIN"));
/// ```
#[derive(Default)]
pub struct RegistryBuilder {
    operations: Vec<Arc<dyn Operation>>,
}

impl RegistryBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in group
    pub fn standard() -> Self {
        Self::new().with_arithmetic().with_scientific().with_financial()
    }

    /// Add exact arithmetic
    pub fn with_arithmetic(mut self) -> Self {
        self.operations.extend(arithmetic_operations());
        self
    }

    /// Add transcendental functions
    pub fn with_scientific(mut self) -> Self {
        self.operations.extend(scientific_operations());
        self
    }

    /// Add financial formulas
    pub fn with_financial(mut self) -> Self {
        self.operations.extend(financial_operations());
        self
    }

    /// Add a caller-supplied operation
    pub fn with_operation(mut self, operation: Arc<dyn Operation>) -> Self {
        self.operations.push(operation);
        self
    }

    /// Build the registry, rejecting duplicate keys
    pub fn build(self) -> Result<OperationRegistry, String> {
        let mut registry = OperationRegistry::new();
        for operation in self.operations {
            registry.register(operation)?;
        }
        Ok(registry)
    }

    /// Build the registry, logging and dropping any operation `register` rejects.
    pub fn build_skipping_rejected(self) -> OperationRegistry {
        let mut registry = OperationRegistry::new();
        for operation in self.operations {
            let symbol = operation.symbol();
            if let Err(reason) = registry.register(operation) {
                tracing::error!(symbol, %reason, "operation not registered");
            }
        }
        registry
    }
}
