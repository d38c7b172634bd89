//! Instruction text sent alongside the table image.

use cueshot_core::TargetGroup;

/// Builds the analysis instructions for the given target group.
///
/// The opposing group is named explicitly so the model cannot drift onto the
/// wrong balls; the black ball is only allowed once the group is cleared.
pub fn build_instructions(target: TargetGroup) -> String {
    let group = target.description();
    let opponent = target.opponent().description();

    format!(
        "You are a professional 8-ball pool instructor and physics expert.
Analyze the provided image of a pool table.

The active player is targeting: {group}.

Identify the cue ball and all object balls.
Determine the statistically optimal next shot for the active player.
You must ONLY recommend a shot on a ball belonging to the {group} group.
If all balls of that group are cleared, you may recommend shooting the 8-ball (black).
Do NOT recommend shooting the opponent's balls ({opponent}).

Consider:
1. Angle of cut.
2. Distance to pocket.
3. Potential cue ball scratch risks.
4. Position for the next shot (leave).
5. Obstacles or blockers.

Return the coordinates as percentages (0-100) relative to the image dimensions (Top-Left is 0,0).
If you cannot determine the exact coordinates, estimate them based on the visual layout.

Output strictly in JSON format matching the schema."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solids_instructions() {
        let text = build_instructions(TargetGroup::Solids);

        assert!(text.contains("targeting: Solids (Balls 1-7, colored balls)."));
        assert!(text.contains("opponent's balls (Stripes (Balls 9-15"));
        assert!(text.contains("8-ball"));
        assert!(text.contains("Top-Left is 0,0"));
    }

    #[test]
    fn test_stripes_instructions_name_stripes_as_target() {
        let text = build_instructions(TargetGroup::Stripes);

        assert!(text.contains("ONLY recommend a shot on a ball belonging to the Stripes"));
        assert!(text.contains("opponent's balls (Solids"));
    }

    #[test]
    fn test_lists_five_considerations() {
        let text = build_instructions(TargetGroup::Solids);
        for item in ["1. Angle", "2. Distance", "3. Potential", "4. Position", "5. Obstacles"] {
            assert!(text.contains(item), "missing {item}");
        }
    }
}
