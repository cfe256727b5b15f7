use super::error::ModelError;
use super::ids::CompartmentId;

pub const DEFAULT_DIMENSION: u8 = 3;
pub const DEFAULT_SIZE: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CompartmentDecl {
    pub(crate) name: String,
    pub(crate) neighbors: Vec<CompartmentId>,
    pub(crate) dimension: u8,
    pub(crate) size: f64,
}

impl CompartmentDecl {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            neighbors: Vec::new(),
            dimension: DEFAULT_DIMENSION,
            size: DEFAULT_SIZE,
        }
    }

    pub fn neighbors<I: IntoIterator<Item = CompartmentId>>(mut self, neighbors: I) -> Self {
        self.neighbors.extend(neighbors);
        self
    }

    pub fn dimension(mut self, dimension: u8) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A named spatial region. Adjacency is not required to be symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct Compartment {
    pub name: String,
    pub dimension: u8,
    pub size: f64,
    pub(crate) neighbors: Vec<CompartmentId>,
}

impl Compartment {
    /// Builds a compartment whose neighbors have already been resolved by the model.
    pub(crate) fn from_decl(decl: CompartmentDecl) -> Result<Self, ModelError> {
        if !(1..=3).contains(&decl.dimension) {
            return Err(ModelError::InvalidCompartmentGeometry {
                compartment: decl.name,
                reason: format!("dimension must be 1, 2 or 3 (got {})", decl.dimension),
            });
        }
        if !(decl.size.is_finite() && decl.size > 0.0) {
            return Err(ModelError::InvalidCompartmentGeometry {
                compartment: decl.name,
                reason: format!("size must be finite and positive (got {})", decl.size),
            });
        }
        Ok(Self {
            name: decl.name,
            dimension: decl.dimension,
            size: decl.size,
            neighbors: decl.neighbors,
        })
    }

    pub fn neighbors(&self) -> &[CompartmentId] {
        &self.neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::ModelUid;
    use slotmap::KeyData;

    fn dummy_compartment_id(n: u64) -> CompartmentId {
        CompartmentId::new(ModelUid::next(), KeyData::from_ffi(n).into())
    }

    #[test]
    fn new_declaration_uses_defaults() {
        let compartment = Compartment::from_decl(CompartmentDecl::new("cell")).unwrap();
        assert_eq!(compartment.name, "cell");
        assert_eq!(compartment.dimension, 3);
        assert_eq!(compartment.size, 1.0);
        assert!(compartment.neighbors().is_empty());
    }

    #[test]
    fn neighbors_keep_declaration_order() {
        let a = dummy_compartment_id(1);
        let b = dummy_compartment_id(2);
        let compartment =
            Compartment::from_decl(CompartmentDecl::new("m").neighbors([b, a]).dimension(2))
                .unwrap();
        assert_eq!(compartment.neighbors(), &[b, a]);
        assert_eq!(compartment.dimension, 2);
    }

    #[test]
    fn dimension_outside_range_is_rejected() {
        for dimension in [0, 4] {
            let err = Compartment::from_decl(CompartmentDecl::new("c").dimension(dimension))
                .unwrap_err();
            assert!(matches!(
                err,
                ModelError::InvalidCompartmentGeometry { ref compartment, .. } if compartment == "c"
            ));
        }
    }

    #[test]
    fn non_positive_or_non_finite_size_is_rejected() {
        for size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = Compartment::from_decl(CompartmentDecl::new("c").size(size));
            assert!(matches!(
                result,
                Err(ModelError::InvalidCompartmentGeometry { .. })
            ));
        }
    }
}
