// [libs/domain/scheduler/src/registry.rs]
/*!
 * APARATO: REGISTRO DE FUNCIONES DE TAREA (ESTRATO L2)
 * RESPONSABILIDAD: Mapa nombre de tarea -> cuerpo ejecutable, separado
 * de las filas persistidas (spec.md 4.4, 4.6 "Configuration").
 */

use std::collections::HashMap;

use crate::task::TaskFn;

pub struct TaskRegistry<Db> {
    functions: HashMap<String, TaskFn<Db>>,
}

impl<Db> Default for TaskRegistry<Db> {
    fn default() -> Self {
        Self { functions: HashMap::new() }
    }
}

impl<Db> TaskRegistry<Db> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, body: TaskFn<Db>) {
        self.functions.insert(name.into(), body);
    }

    pub fn get(&self, name: &str) -> Option<&TaskFn<Db>> {
        self.functions.get(name)
    }

    pub fn registered_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}
