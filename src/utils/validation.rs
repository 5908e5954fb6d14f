//! Utilidades de validación
//!
//! Este módulo contiene las validaciones que no caben en los atributos
//! derive de los DTOs, en particular las de cota dinámica.

use chrono::{Datelike, Utc};
use validator::ValidationError;

/// Año mínimo aceptado para un vehículo
pub const ANO_MIN: i32 = 1900;

/// Validar el año del vehículo: 1900 <= ano <= año actual + 1
///
/// La cota superior depende del reloj, así que se valida aquí y no
/// con un atributo `range` estático.
pub fn validate_ano(ano: i32) -> Result<(), ValidationError> {
    let max = Utc::now().year() + 1;
    if ano < ANO_MIN || ano > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &ANO_MIN);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &ano);
        return Err(error);
    }
    Ok(())
}
