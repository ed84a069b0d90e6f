/// Levenshtein edit distance over Unicode scalar values.
pub fn levenshtein(a: &str, b: &str) -> usize {
	let a: Vec<char> = a.chars().collect();
	let b: Vec<char> = b.chars().collect();

	if a.is_empty() {
		return b.len();
	}
	if b.is_empty() {
		return a.len();
	}

	// Single rolling row; `row[j]` holds the distance between the current prefix of `a` and
	// `b[..j]`.
	let mut row: Vec<usize> = (0..=b.len()).collect();

	for (i, a_ch) in a.iter().enumerate() {
		let mut diagonal = row[0];

		row[0] = i + 1;

		for (j, b_ch) in b.iter().enumerate() {
			let substitution = diagonal + usize::from(a_ch != b_ch);
			let insertion = row[j] + 1;
			let deletion = row[j + 1] + 1;

			diagonal = row[j + 1];
			row[j + 1] = substitution.min(insertion).min(deletion);
		}
	}

	row[b.len()]
}
