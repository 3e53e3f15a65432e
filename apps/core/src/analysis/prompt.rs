//! Prompt construction for work-rules review.

/// Review categories the provider is asked to cover, in prompt order.
pub const REVIEW_CATEGORIES: [&str; 5] = [
    "법적 준수사항 검토",
    "근로조건 분석",
    "복리후생 평가",
    "징계 및 해고 규정 검토",
    "개선 권고사항",
];

const PROMPT_PREAMBLE: &str = "다음은 회사의 취업규칙 문서입니다. 한국 근로기준법 및 관련 노동법령에 비추어 \
이 문서를 전문 노무사의 관점에서 검토하고, 아래 항목별로 분석해 주세요.";

const CATEGORY_GUIDANCE: [&str; 5] = [
    "근로기준법, 최저임금법, 남녀고용평등법 등 관련 법령 위반 여부와 필수 기재사항 누락 여부",
    "근로시간, 휴게, 휴일, 연장·야간·휴일근로, 휴가 제도의 적정성",
    "임금 체계, 수당, 복리후생 제도의 수준과 법정 기준 충족 여부",
    "징계 사유와 절차, 해고 요건의 정당성 및 근로자 보호 장치",
    "우선순위가 높은 문제점부터 구체적인 수정 방안 제시",
];

const PROMPT_CLOSING: &str = "각 항목마다 발견된 사항과 그 중요도를 명확히 밝히고, \
근거가 되는 조항을 인용해 주세요. 답변은 한국어로 작성해 주세요.";

/// Builds the evaluation prompt for one document.
///
/// The document text is embedded verbatim. The caller is responsible for
/// rejecting empty content before calling this.
pub fn build_analysis_prompt(content: &str, file_name: Option<&str>) -> String {
    let mut prompt = String::with_capacity(content.len() + 1024);
    prompt.push_str(PROMPT_PREAMBLE);
    prompt.push_str("\n\n");

    if let Some(name) = file_name.map(str::trim).filter(|name| !name.is_empty()) {
        prompt.push_str(&format!("파일명: {}\n\n", name));
    }

    prompt.push_str(&format!(
        r#"취업규칙 내용:
---
{}
---

분석 항목:
"#,
        content
    ));

    for (index, (category, guidance)) in REVIEW_CATEGORIES
        .iter()
        .zip(CATEGORY_GUIDANCE.iter())
        .enumerate()
    {
        prompt.push_str(&format!("{}. {}: {}\n", index + 1, category, guidance));
    }

    prompt.push('\n');
    prompt.push_str(PROMPT_CLOSING);
    prompt
}
