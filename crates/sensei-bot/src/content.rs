//! Static content served by the bot

/// Highlights of the 2024 India Budget, served by /budget_highlights
pub const BUDGET_HIGHLIGHTS: [&str; 20] = [
    "*Income Tax:* There are no changes in the income tax slabs or rates. The new regime tax slabs remain as follows: no tax up to ₹3 lakh, 5% for income between ₹3-6 lakh, 10% for ₹6-9 lakh, 15% for ₹9-12 lakh, and 20% for ₹12-15 lakh. Income above ₹15 lakh is taxed at 30%.",
    "*Fiscal Deficit:* The fiscal deficit target for FY25 is set at 5.1% of GDP. This is part of a continued effort to reduce the fiscal deficit to 4.5% by FY26.",
    "*Economic Growth:* The budget continues to focus on macroeconomic stability and growth, with increased investments in infrastructure, agriculture, and domestic tourism.",
    "*Capital Expenditure:* Capital expenditure is increased by 11.1% to ₹11.11 lakh crore, which is 3.4% of GDP. This includes significant allocations for infrastructure projects.",
    "*Railways:* 40,000 normal rail bogies will be converted to Vande Bharat to enhance passenger safety and comfort. Three major railway corridors have also been announced.",
    "*Women's Empowerment:* The 'Lakhpati Didi' scheme aims to empower women in rural areas, with the target increased from 2 crore to 3 crore women benefiting from the program.",
    "*Defense:* The budget includes a significant allocation for defense to ensure national security and modernization of the armed forces.",
    "*Customs Duty:* No changes have been made to the customs duties, maintaining the status quo to provide stability for businesses.",
    "*Digital Infrastructure:* Continued investment in digital infrastructure is emphasized, with a focus on Global Capability Centres (GCCs) and digital transformation.",
    "*Green Energy:* Support for green energy initiatives continues, with significant investments in renewable energy projects.",
    "*Healthcare:* The budget allocates funds for the improvement of healthcare infrastructure and services, aiming to make healthcare more accessible and affordable.",
    "*Education:* Increased funding for educational initiatives, including skill development and vocational training programs.",
    "*Stock Market:* The budget is expected to positively impact the stock market with its focus on fiscal discipline and growth-oriented measures.",
    "*Middle Class:* Despite no changes in tax rates, the budget includes measures to simplify tax laws and improve compliance, which could benefit the middle class by making tax filing easier.",
    "*Lower Class:* Programs aimed at poverty alleviation and social welfare continue to receive funding, ensuring support for the lower class.",
    "*Upper Middle Class:* Initiatives to boost housing, infrastructure, and digital services benefit the upper middle class by improving the overall quality of life and economic opportunities.",
    "*Agriculture:* Significant investment in the agriculture sector, including subsidies and support for farmers to boost productivity and income.",
    "*Tourism:* Increased funding for domestic tourism to promote cultural heritage and boost local economies.",
    "*Government Expenditure:* The budget maintains a focus on prudent government expenditure to ensure long-term economic stability.",
    "*Economic Corridors:* Development of commodity-specific economic rail corridors to reduce logistics costs and improve competitiveness in manufacturing.",
];

/// Render the budget highlights as one reply
pub fn budget_highlights_message() -> String {
    format!(
        "Here are the highlights of the 2024 India Budget:\n\n{}",
        BUDGET_HIGHLIGHTS.join("\n\n")
    )
}
