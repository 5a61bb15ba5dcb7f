pub mod docs;
pub mod estudiantes;
pub mod materias;
pub mod notas;

pub use docs::*;
pub use estudiantes::*;
pub use materias::*;
pub use notas::*;
