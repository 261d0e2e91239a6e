use crate::model::{OutputTable, ProvisionedMember};

/// Lays out enriched members with the derived columns in place (Username
/// first, Firstname and Lastname after Name, TempPassword last when
/// `with_password`) and removes the `dropped` columns.
pub fn build_output_table(
    members: &[ProvisionedMember],
    dropped: &[&str],
    with_password: bool,
) -> OutputTable {
    let expanded = ProvisionedMember::expanded_columns(with_password);
    let kept: Vec<usize> = expanded
        .iter()
        .enumerate()
        .filter(|(_, column)| !dropped.contains(*column))
        .map(|(index, _)| index)
        .collect();

    let columns = kept
        .iter()
        .map(|&index| expanded[index].to_string())
        .collect();
    let rows = members
        .iter()
        .map(|member| {
            let mut values = member.expanded_values(with_password);
            kept.iter()
                .map(|&index| std::mem::take(&mut values[index]))
                .collect()
        })
        .collect();

    OutputTable { columns, rows }
}
