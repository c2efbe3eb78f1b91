//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use serde::Serialize;
use validator::ValidationError;

/// Validar que un valor esté en un rango específico
pub fn validate_range<T: PartialOrd + std::fmt::Display + serde::Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de email
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !value.contains('@') || !value.contains('.') {
        let mut error = ValidationError::new("email");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_digit(10)).collect::<String>();
    if clean_phone.len() < 7 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea positivo
pub fn validate_positive<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de matrícula de vehículo
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    // Formato básico: XX-123-XX o similar
    let clean_plate = value.replace([' ', '-', '_'], "");
    if clean_plate.len() < 5 || clean_plate.len() > 10 {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de número de serie de neumático
pub fn validate_serial_number(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.len() < 3 || trimmed.len() > 60 {
        let mut error = ValidationError::new("serial_number");
        error.add_param("value".into(), &value.to_string());
        error.add_param("length".into(), &"3-60 characters".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar profundidad de banda de rodamiento en milímetros
pub fn validate_tread_depth_mm(value: f64) -> Result<(), ValidationError> {
    validate_range(value, 0.0, 40.0).map_err(|_| {
        let mut error = ValidationError::new("tread_depth");
        error.add_param("value".into(), &value);
        error.add_param("range".into(), &"0.0 to 40.0 mm".to_string());
        error
    })
}

/// Validar presión de inflado en PSI
pub fn validate_pressure_psi(value: f64) -> Result<(), ValidationError> {
    validate_range(value, 1.0, 200.0).map_err(|_| {
        let mut error = ValidationError::new("pressure");
        error.add_param("value".into(), &value);
        error.add_param("range".into(), &"1.0 to 200.0 psi".to_string());
        error
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        assert!(validate_range(5, 1, 10).is_ok());
        assert!(validate_range(0, 1, 10).is_err());
        assert!(validate_range(15, 1, 10).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("invalid-email").is_err());
        assert!(validate_email("test@").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("987654321").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(5).is_ok());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(-5).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(0).is_ok());
        assert!(validate_non_negative(-1).is_err());
    }

    #[test]
    fn test_validate_license_plate() {
        assert!(validate_license_plate("AB-123-CD").is_ok());
        assert!(validate_license_plate("A").is_err());
        assert!(validate_license_plate("ABCDEFGHIJK").is_err());
    }

    #[test]
    fn test_validate_serial_number() {
        assert!(validate_serial_number("NS-2024-00981").is_ok());
        assert!(validate_serial_number("AB").is_err());
        assert!(validate_serial_number(&"X".repeat(61)).is_err());
    }

    #[test]
    fn test_validate_tread_depth() {
        assert!(validate_tread_depth_mm(12.5).is_ok());
        assert!(validate_tread_depth_mm(-0.5).is_err());
        assert!(validate_tread_depth_mm(55.0).is_err());
    }

    #[test]
    fn test_validate_pressure() {
        assert!(validate_pressure_psi(110.0).is_ok());
        assert!(validate_pressure_psi(0.0).is_err());
        assert!(validate_pressure_psi(350.0).is_err());
    }
}
