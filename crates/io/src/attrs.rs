//! Attribute helpers and CF packing.

use netcdf::AttributeValue;

/// Variable attributes that only describe the stored representation and
/// are dropped once values are unpacked.
const PACKING_ATTRS: [&str; 3] = ["scale_factor", "add_offset", "missing_value"];

/// Whether a variable attribute survives unpacking to plain floats.
///
/// Reserved names (leading underscore, e.g. `_FillValue`) and the packing
/// attributes are dropped.
pub(crate) fn is_copyable_var_attr(name: &str) -> bool {
    !name.starts_with('_') && !PACKING_ATTRS.contains(&name)
}

/// Whether a global attribute is carried into a rewritten file.
pub(crate) fn is_copyable_global_attr(name: &str) -> bool {
    !name.starts_with('_')
}

/// Numeric scalar value of an attribute, if it has one.
pub(crate) fn as_f64(value: &AttributeValue) -> Option<f64> {
    match value {
        AttributeValue::Double(v) => Some(*v),
        AttributeValue::Float(v) => Some(f64::from(*v)),
        AttributeValue::Short(v) => Some(f64::from(*v)),
        AttributeValue::Ushort(v) => Some(f64::from(*v)),
        AttributeValue::Int(v) => Some(f64::from(*v)),
        AttributeValue::Uint(v) => Some(f64::from(*v)),
        AttributeValue::Schar(v) => Some(f64::from(*v)),
        AttributeValue::Uchar(v) => Some(f64::from(*v)),
        AttributeValue::Longlong(v) => Some(*v as f64),
        AttributeValue::Ulonglong(v) => Some(*v as f64),
        AttributeValue::Doubles(v) => v.first().copied(),
        AttributeValue::Floats(v) => v.first().map(|&f| f64::from(f)),
        AttributeValue::Shorts(v) => v.first().map(|&s| f64::from(s)),
        _ => None,
    }
}

/// Reads a numeric attribute of `var`, ignoring absent or non-numeric ones.
pub(crate) fn attr_f64(var: &netcdf::Variable<'_>, name: &str) -> Option<f64> {
    var.attribute_value(name)
        .and_then(|r| r.ok())
        .and_then(|v| as_f64(&v))
}

/// Reads a text attribute of `var`.
pub(crate) fn attr_string(var: &netcdf::Variable<'_>, name: &str) -> Option<String> {
    var.attribute_value(name)
        .and_then(|r| r.ok())
        .and_then(|v| match v {
            AttributeValue::Str(s) => Some(s),
            _ => None,
        })
}

/// CF packing of a stored variable: `value = raw * scale + offset`, with
/// raw fill values mapped to NaN.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Packing {
    scale: f64,
    offset: f64,
    fill: Vec<f64>,
}

impl Default for Packing {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: 0.0,
            fill: Vec::new(),
        }
    }
}

impl Packing {
    /// Packing described by the attributes of `var`.
    pub(crate) fn of(var: &netcdf::Variable<'_>) -> Self {
        let fill = ["_FillValue", "missing_value"]
            .into_iter()
            .filter_map(|name| attr_f64(var, name))
            .collect();
        Self {
            scale: attr_f64(var, "scale_factor").unwrap_or(1.0),
            offset: attr_f64(var, "add_offset").unwrap_or(0.0),
            fill,
        }
    }

    #[cfg(test)]
    pub(crate) fn new(scale: f64, offset: f64, fill: Vec<f64>) -> Self {
        Self {
            scale,
            offset,
            fill,
        }
    }

    /// Unpacks raw stored values in place.
    pub(crate) fn unpack(&self, raw: &mut [f64]) {
        for v in raw.iter_mut() {
            *v = if self.fill.contains(v) {
                f64::NAN
            } else {
                *v * self.scale + self.offset
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copyable_attributes() {
        assert!(is_copyable_var_attr("units"));
        assert!(is_copyable_var_attr("long_name"));
        assert!(!is_copyable_var_attr("_FillValue"));
        assert!(!is_copyable_var_attr("scale_factor"));
        assert!(!is_copyable_var_attr("add_offset"));
        assert!(!is_copyable_var_attr("missing_value"));

        assert!(is_copyable_global_attr("Conventions"));
        assert!(!is_copyable_global_attr("_NCProperties"));
    }

    #[test]
    fn numeric_attribute_values() {
        assert_eq!(as_f64(&AttributeValue::Short(-32767)), Some(-32767.0));
        assert_eq!(as_f64(&AttributeValue::Double(0.5)), Some(0.5));
        assert_eq!(as_f64(&AttributeValue::Float(0.25)), Some(0.25));
        assert_eq!(as_f64(&AttributeValue::Str("K".into())), None);
    }

    #[test]
    fn unpack_scales_and_masks() {
        let packing = Packing::new(0.5, 270.0, vec![-32767.0]);
        let mut raw = vec![0.0, 2.0, -32767.0, -4.0];
        packing.unpack(&mut raw);
        assert_eq!(raw[0], 270.0);
        assert_eq!(raw[1], 271.0);
        assert!(raw[2].is_nan());
        assert_eq!(raw[3], 268.0);
    }

    #[test]
    fn default_packing_is_identity() {
        let mut raw = vec![1.5, -2.0];
        Packing::default().unpack(&mut raw);
        assert_eq!(raw, vec![1.5, -2.0]);
    }
}
