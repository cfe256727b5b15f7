use super::error::ModelError;
use super::ids::ParameterId;
use super::model::Model;
use super::pattern::{MonomerPattern, ReactionPattern};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternSide {
    Reactants,
    Products,
}

impl fmt::Display for PatternSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Reactants => "reactants",
                Self::Products => "products",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDecl {
    pub(crate) name: String,
    pub(crate) reactants: ReactionPattern,
    pub(crate) products: ReactionPattern,
    pub(crate) rate: ParameterId,
}

impl RuleDecl {
    pub fn new(
        name: &str,
        reactants: impl Into<ReactionPattern>,
        products: impl Into<ReactionPattern>,
        rate: ParameterId,
    ) -> Self {
        Self {
            name: name.to_string(),
            reactants: reactants.into(),
            products: products.into(),
            rate,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A named transformation from reactant patterns to product patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub rate: ParameterId,
    reactants: Vec<MonomerPattern>,
    products: Vec<MonomerPattern>,
}

impl Rule {
    pub(crate) fn from_decl(
        decl: RuleDecl,
        model: &Model,
        enforce_bond_balance: bool,
    ) -> Result<Self, ModelError> {
        let RuleDecl {
            name,
            reactants,
            products,
            rate,
        } = decl;

        let invalid_reactants = invalid_positions(reactants.patterns(), model);
        if !invalid_reactants.is_empty() {
            return Err(ModelError::InvalidReactant {
                rule: name,
                positions: invalid_reactants,
            });
        }
        let invalid_products = invalid_positions(products.patterns(), model);
        if !invalid_products.is_empty() {
            return Err(ModelError::InvalidProduct {
                rule: name,
                positions: invalid_products,
            });
        }
        if model.parameter(rate).is_none() {
            return Err(ModelError::InvalidRate { rule: name });
        }

        if enforce_bond_balance {
            for (side, patterns) in [
                (PatternSide::Reactants, reactants.patterns()),
                (PatternSide::Products, products.patterns()),
            ] {
                let bonds = unbalanced_bonds(patterns);
                if !bonds.is_empty() {
                    return Err(ModelError::UnbalancedBond {
                        rule: name,
                        side,
                        bonds,
                    });
                }
            }
        }

        Ok(Self {
            name,
            rate,
            reactants: reactants.into_patterns(),
            products: products.into_patterns(),
        })
    }

    pub fn reactants(&self) -> &[MonomerPattern] {
        &self.reactants
    }

    pub fn products(&self) -> &[MonomerPattern] {
        &self.products
    }

    pub fn display<'a>(&'a self, model: &'a Model) -> RuleDisplay<'a> {
        RuleDisplay { rule: self, model }
    }
}

fn invalid_positions(patterns: &[MonomerPattern], model: &Model) -> Vec<usize> {
    patterns
        .iter()
        .enumerate()
        .filter(|(_, pattern)| !pattern.is_valid_in(model))
        .map(|(i, _)| i)
        .collect()
}

/// Returns every bond index that does not occur exactly twice across `patterns`,
/// with its occurrence count, in ascending index order.
pub fn unbalanced_bonds(patterns: &[MonomerPattern]) -> Vec<(u32, usize)> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for index in patterns.iter().flat_map(MonomerPattern::bond_indices) {
        *counts.entry(index).or_insert(0) += 1;
    }
    counts.into_iter().filter(|&(_, count)| count != 2).collect()
}

pub struct RuleDisplay<'a> {
    rule: &'a Rule,
    model: &'a Model,
}

impl RuleDisplay<'_> {
    fn write_side(&self, f: &mut fmt::Formatter<'_>, patterns: &[MonomerPattern]) -> fmt::Result {
        if patterns.is_empty() {
            return write!(f, "0");
        }
        for (i, pattern) in patterns.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}", pattern.display(self.model))?;
        }
        Ok(())
    }
}

impl fmt::Display for RuleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.rule.name)?;
        self.write_side(f, &self.rule.reactants)?;
        write!(f, " >> ")?;
        self.write_side(f, &self.rule.products)?;
        let rate = self
            .model
            .parameter(self.rule.rate)
            .map_or("<unresolved>", |p| p.name.as_str());
        write!(f, " @ {rate}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::MonomerId;
    use crate::core::models::monomer::MonomerDecl;
    use crate::core::models::pattern::SiteCondition;

    struct TestRefs {
        l: MonomerId,
        r: MonomerId,
        kf: ParameterId,
    }

    fn create_test_model() -> (Model, TestRefs) {
        let mut model = Model::new("binding");
        let l = model
            .insert_monomer(MonomerDecl::new("L").sites(["r"]), true)
            .unwrap();
        let r = model
            .insert_monomer(MonomerDecl::new("R").sites(["l", "d"]), true)
            .unwrap();
        let kf = model.insert_parameter("kf", Some(1e-3)).unwrap();
        (model, TestRefs { l, r, kf })
    }

    #[test]
    fn binding_rule_with_balanced_bonds_is_accepted() {
        let (model, refs) = create_test_model();
        let l_free = model
            .pattern(refs.l)
            .site("r", SiteCondition::Unspecified)
            .build()
            .unwrap();
        let r_free = model.pattern(refs.r).build().unwrap();
        let l_bound = model.pattern(refs.l).site("r", 1u32).build().unwrap();
        let r_bound = model.pattern(refs.r).site("l", 1u32).build().unwrap();

        let decl = l_free
            .combine(r_free)
            .into_rule(l_bound.combine(r_bound), "bind", refs.kf);
        let rule = Rule::from_decl(decl, &model, true).unwrap();

        assert_eq!(rule.name, "bind");
        assert_eq!(rule.rate, refs.kf);
        assert_eq!(rule.reactants().len(), 2);
        assert_eq!(rule.products().len(), 2);
        assert_eq!(
            rule.display(&model).to_string(),
            "bind: L(r=?) + R() >> L(r=1) + R(l=1) @ kf"
        );
    }

    #[test]
    fn reactants_unknown_to_the_model_are_rejected() {
        let (model, refs) = create_test_model();
        let empty = Model::new("empty");
        let l = model.pattern(refs.l).build().unwrap();
        let r = model.pattern(refs.r).build().unwrap();

        let decl = RuleDecl::new("r", l.combine(r), ReactionPattern::new(), refs.kf);
        let err = Rule::from_decl(decl, &empty, true).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidReactant {
                rule: "r".to_string(),
                positions: vec![0, 1],
            }
        );
    }

    #[test]
    fn invalid_product_positions_are_reported() {
        let (model, refs) = create_test_model();
        let empty = Model::new("empty");
        let valid_in_model = model.pattern(refs.r).build().unwrap();
        let decl = RuleDecl::new("r", ReactionPattern::new(), valid_in_model, refs.kf);
        let err = Rule::from_decl(decl, &empty, true).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidProduct {
                rule: "r".to_string(),
                positions: vec![0],
            }
        );
    }

    #[test]
    fn patterns_built_by_another_model_are_rejected_even_when_keys_collide() {
        let (model, refs) = create_test_model();
        let mut other = Model::new("other");
        let s = other
            .insert_monomer(MonomerDecl::new("S").sites(["r"]), true)
            .unwrap();
        assert_eq!(s.key(), refs.l.key());
        let foreign = other.pattern(s).site("r", 1u32).build().unwrap();

        let decl = RuleDecl::new(
            "r",
            foreign.clone().combine(foreign),
            ReactionPattern::new(),
            refs.kf,
        );
        let err = Rule::from_decl(decl, &model, true).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidReactant {
                rule: "r".to_string(),
                positions: vec![0, 1],
            }
        );
    }

    #[test]
    fn rate_that_is_not_a_parameter_of_the_model_is_rejected() {
        let (model, refs) = create_test_model();
        let mut other = Model::new("other");
        let foreign_rate = other.insert_parameter("kf", None).unwrap();
        assert_eq!(foreign_rate.key(), refs.kf.key());

        let decl = RuleDecl::new(
            "r",
            ReactionPattern::new(),
            ReactionPattern::new(),
            foreign_rate,
        );
        let err = Rule::from_decl(decl, &model, true).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidRate {
                rule: "r".to_string()
            }
        );
    }

    #[test]
    fn dangling_bond_in_reactants_is_reported_with_count() {
        let (model, refs) = create_test_model();
        let l_bound = model.pattern(refs.l).site("r", 1u32).build().unwrap();
        let r_free = model.pattern(refs.r).build().unwrap();
        let decl = RuleDecl::new(
            "dangling",
            l_bound.combine(r_free),
            ReactionPattern::new(),
            refs.kf,
        );
        let err = Rule::from_decl(decl, &model, true).unwrap_err();
        assert_eq!(
            err,
            ModelError::UnbalancedBond {
                rule: "dangling".to_string(),
                side: PatternSide::Reactants,
                bonds: vec![(1, 1)],
            }
        );
    }

    #[test]
    fn over_used_bond_in_products_is_reported() {
        let (model, refs) = create_test_model();
        let products: ReactionPattern = [
            model.pattern(refs.l).site("r", 4u32).build().unwrap(),
            model
                .pattern(refs.r)
                .site("l", 4u32)
                .site("d", 4u32)
                .build()
                .unwrap(),
        ]
        .into_iter()
        .collect();
        let decl = RuleDecl::new("triple", ReactionPattern::new(), products, refs.kf);
        let err = Rule::from_decl(decl, &model, true).unwrap_err();
        assert_eq!(
            err,
            ModelError::UnbalancedBond {
                rule: "triple".to_string(),
                side: PatternSide::Products,
                bonds: vec![(4, 3)],
            }
        );
    }

    #[test]
    fn bond_balance_can_be_disabled() {
        let (model, refs) = create_test_model();
        let l_bound = model.pattern(refs.l).site("r", 1u32).build().unwrap();
        let decl = RuleDecl::new("loose", l_bound, ReactionPattern::new(), refs.kf);
        assert!(Rule::from_decl(decl, &model, false).is_ok());
    }

    #[test]
    fn unbalanced_bonds_lists_indices_in_ascending_order() {
        let (model, refs) = create_test_model();
        let patterns = vec![
            model
                .pattern(refs.r)
                .site("l", 7u32)
                .site("d", 2u32)
                .build()
                .unwrap(),
            model.pattern(refs.l).site("r", 2u32).build().unwrap(),
            model.pattern(refs.r).site("l", 5u32).build().unwrap(),
        ];
        assert_eq!(unbalanced_bonds(&patterns), vec![(5, 1), (7, 1)]);
        assert!(unbalanced_bonds(&[]).is_empty());
    }

    #[test]
    fn empty_sides_render_as_zero() {
        let (model, refs) = create_test_model();
        let l = model.pattern(refs.l).build().unwrap();
        let decl = RuleDecl::new("degrade", l, ReactionPattern::new(), refs.kf);
        let rule = Rule::from_decl(decl, &model, true).unwrap();
        assert_eq!(rule.display(&model).to_string(), "degrade: L() >> 0 @ kf");
    }
}
