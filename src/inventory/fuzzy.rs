// Fuzzy string similarity

/// Similarity of `a` and `b` on a 0-100 scale.
///
/// Indel-distance ratio: twice the longest common subsequence over the
/// combined length, rounded half to even. Either side empty scores 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let common = lcs_len(&a, &b);
    round_half_even(200 * common, a.len() + b.len()) as u8
}

/// `num / den` rounded to the nearest integer, exact halves to the even one
fn round_half_even(num: usize, den: usize) -> usize {
    let quotient = num / den;
    let twice_rem = 2 * (num % den);
    if twice_rem > den || (twice_rem == den && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
