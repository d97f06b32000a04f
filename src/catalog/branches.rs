use super::BranchDirectory;

/// A lending location of the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: &'static str,
    pub code: &'static str,
}

/// Branches of the Leipzig municipal library and their catalog codes
pub const LEIPZIG_BRANCHES: &[Branch] = &[
    Branch { name: "Zentralbibliothek", code: "00" },
    Branch { name: "Gohlis", code: "20" },
    Branch { name: "Grünau-Mitte", code: "21" },
    Branch { name: "Grünau-Nord", code: "22" },
    Branch { name: "Holzhausen", code: "23" },
    Branch { name: "Mockau", code: "24" },
    Branch { name: "Paunsdorf", code: "25" },
    Branch { name: "Plagwitz", code: "26" },
    Branch { name: "Reudnitz", code: "27" },
    Branch { name: "Schönefeld", code: "28" },
    Branch { name: "Südvorstadt", code: "29" },
    Branch { name: "Volkmarsdorf", code: "30" },
    Branch { name: "Wiederitzsch", code: "31" },
    Branch { name: "Lützschena-Stahmeln", code: "32" },
    Branch { name: "Böhlitz-Ehrenberg", code: "33" },
    Branch { name: "Fahrbibliothek", code: "40" },
];

/// Branch directory backed by a fixed table
#[derive(Debug, Clone)]
pub struct StaticBranchDirectory {
    branches: Vec<Branch>,
}

impl Default for StaticBranchDirectory {
    fn default() -> Self {
        Self::new(LEIPZIG_BRANCHES.to_vec())
    }
}

impl StaticBranchDirectory {
    pub fn new(branches: Vec<Branch>) -> Self {
        Self { branches }
    }
}

impl BranchDirectory for StaticBranchDirectory {
    fn resolve_branch_code(&self, branch: &str) -> Option<String> {
        let wanted = branch.trim().to_lowercase();
        self.branches
            .iter()
            .find(|b| b.name.to_lowercase() == wanted)
            .map(|b| b.code.to_string())
    }

    fn branches(&self) -> &[Branch] {
        &self.branches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_case_insensitively() {
        let directory = StaticBranchDirectory::default();
        assert_eq!(directory.resolve_branch_code("gohlis").as_deref(), Some("20"));
        assert_eq!(directory.resolve_branch_code("  GRÜNAU-MITTE ").as_deref(), Some("21"));
    }

    #[test]
    fn unknown_branch_is_not_found() {
        let directory = StaticBranchDirectory::default();
        assert_eq!(directory.resolve_branch_code("atlantis"), None);
        assert_eq!(directory.resolve_branch_code(""), None);
    }

    #[test]
    fn branch_codes_are_unique() {
        let mut codes: Vec<&str> = LEIPZIG_BRANCHES.iter().map(|b| b.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), LEIPZIG_BRANCHES.len());
    }
}
