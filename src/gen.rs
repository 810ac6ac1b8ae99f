use itertools::Itertools;

/// 去掉重复的词，保留首次出现的顺序
pub fn dedup_wordlist<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    words.into_iter().map(Into::into).unique().collect()
}

/// 从已知子域名中提取字典
///
/// 只处理以 `.domain` 结尾的名字：去掉后缀后按 `.` 拆分，空片段丢弃，结果去重。
pub fn generate_wordlist_from_subdomains(subdomains: &[String], domain: &str) -> Vec<String> {
    let suffix = format!(".{}", domain);
    let words = subdomains
        .iter()
        .filter_map(|sub| sub.strip_suffix(suffix.as_str()))
        .flat_map(|stripped| stripped.split('.'))
        .filter(|word| !word.is_empty());
    dedup_wordlist(words)
}

/// 用字典生成多级子域名
///
/// 第一级是 `word.domain`；之后每一级把每个词拼到已有的全部结果前面，再追加到结果里。
/// 结果是累积的且不去重，规模按 |W| * (|W| + 1)^(levels - 1) 增长。`levels` 为 0 时按 1 处理。
pub fn generate_permutations(wordlist: &[String], domain: &str, levels: usize) -> Vec<String> {
    let mut permutations: Vec<String> = wordlist
        .iter()
        .map(|word| format!("{}.{}", word, domain))
        .collect();

    for _ in 1..levels {
        let new_permutations: Vec<String> = wordlist
            .iter()
            .cartesian_product(permutations.iter())
            .map(|(word, perm)| format!("{}.{}", word, perm))
            .collect();
        permutations.extend(new_permutations);
    }

    permutations
}
