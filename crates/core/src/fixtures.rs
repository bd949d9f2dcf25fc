//! Shared test inputs.

pub(crate) const SAMPLE: &str = "\
# UK Baked Beans (Deep Research)
生成日期：2025-12-01

## Executive Summary
Baked beans are **everyday** food.

生成日期：2025-12-01
Cheap and filling.

## Key Findings
- **Path dependence**: Heinz arrived early [1].
- **Constraints**: Rationing made tins normal.
- Plain finding without title

## Detailed Analysis
### 1. Entry path
Heinz imported, then localized [1] [4].
- Brand to channel
- **Localization** cut prices

### 2. Constraint environment
Shelf-stable food won [1].

## Areas of Consensus
- Convenient
- *Cheap*

## Areas of Debate
- Timeline of adoption

## Sources
[1] Heinz history. https://example.com/heinz
[2] Breakfast survey. https://example.com/survey
Unnumbered note

## Gaps and Further Research
- Find wartime archives
";

pub(crate) const THEME: &str = "\
# Golden Hour

## Color Palette
- **Mustard Yellow**: `#F4A900`
- **Terracotta**: `#C1666B`
- **Warm Beige**: `#D4B896`
- **Chocolate Brown**: `#4A403A`

## Typography
- **Headers**: DejaVu Sans Bold
- **Body Text**: DejaVu Sans
";

/// All headings present, every section empty.
pub(crate) const EMPTY_SECTIONS: &str = "\
# Empty Report
## Executive Summary
## Key Findings
## Detailed Analysis
## Areas of Consensus
## Areas of Debate
## Sources
## Gaps and Further Research
";
