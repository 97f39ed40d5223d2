use setup_utils::CheckForCorrectness;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    Bn254,
    Bls12_377,
}

pub fn curve_from_str(src: &str) -> Result<CurveKind, String> {
    let curve = match src.to_lowercase().as_str() {
        "bn254" => CurveKind::Bn254,
        "bls12_377" => CurveKind::Bls12_377,
        _ => return Err("unsupported curve. Currently supported: bn254, bls12_377".to_string()),
    };
    Ok(curve)
}

pub fn correctness_from_str(src: &str) -> Result<CheckForCorrectness, String> {
    let check = match src.to_lowercase().as_str() {
        "full" => CheckForCorrectness::Full,
        "only_non_zero" => CheckForCorrectness::OnlyNonZero,
        "only_in_group" => CheckForCorrectness::OnlyInGroup,
        "no" => CheckForCorrectness::No,
        _ => {
            return Err(
                "unsupported correctness check. Currently supported: full, only_non_zero, only_in_group, no"
                    .to_string(),
            )
        }
    };
    Ok(check)
}
