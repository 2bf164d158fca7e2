//! Business proposal sections.

use super::{item_text, list_or, SectionContext};
use crate::diagram::{self, GanttTask};
use crate::interpolate::{parse_date, value_to_decimal, Fields};
use crate::invoice::checked_sum;
use crate::model::{Page, SectionId};
use crate::render::markup::{escape_html, PageBuilder};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

fn client(f: &Fields<'_>) -> String {
    f.text("clientCompany", "[Client Company]")
}

fn provider(f: &Fields<'_>) -> String {
    f.text("companyInfo.name", "[Your Company]")
}

fn project(f: &Fields<'_>) -> String {
    f.text("projectName", "[Project Name]")
}

pub(super) fn cover(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    PageBuilder::untitled(SectionId::Cover)
        .raw("<div class=\"cover\">")
        .paragraph_class("eyebrow", "Business Proposal")
        .heading(1, &project(&f))
        .paragraph_class("subtitle", &format!("Prepared for {}", client(&f)))
        .details(&[
            ("Client", f.text("clientName", "[Client Name]")),
            ("Company", client(&f)),
            ("Address", f.text("clientAddress", "[Client Address]")),
            ("Prepared by", provider(&f)),
            ("Proposal No.", f.document_number("proposalNumber")),
            ("Date", f.date("date")),
            ("Valid until", f.date_or("validUntil", "[Valid Until]")),
        ])
        .raw("</div>")
        .finish()
}

pub(super) fn executive_summary(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let summary = f.text(
        "executiveSummary",
        &format!(
            "{} is pleased to present this proposal to {} for {}. [Summarize the engagement, the expected outcomes and why your team is the right partner.]",
            provider(&f),
            client(&f),
            project(&f)
        ),
    );
    PageBuilder::new(SectionId::ExecutiveSummary)
        .paragraph(&summary)
        .callout(&format!(
            "Total investment: {}",
            total_investment(&f).unwrap_or_else(|| "[Total Investment]".to_string())
        ))
        .labeled("Estimated duration", &f.text("duration", "[Project Duration]"))
        .finish()
}

pub(super) fn company_overview(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    PageBuilder::new(SectionId::CompanyOverview)
        .paragraph(&f.text(
            "companyInfo.description",
            "[Describe your company, its mission and its track record.]",
        ))
        .details(&[
            ("Company", provider(&f)),
            ("Founded", f.text("companyInfo.founded", "[Year Founded]")),
            ("Employees", f.text("companyInfo.employees", "[Team Size]")),
            ("Address", f.text("companyInfo.address", "[Company Address]")),
            ("Email", f.text("companyInfo.email", "[Company Email]")),
            ("Phone", f.text("companyInfo.phone", "[Company Phone]")),
            ("Website", f.text("companyInfo.website", "[Company Website]")),
        ])
        .finish()
}

pub(super) fn client_background(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    PageBuilder::new(SectionId::ClientBackground)
        .paragraph(&f.text(
            "clientBackground",
            &format!("[Describe {}, its market and its current situation.]", client(&f)),
        ))
        .labeled("Industry", &f.text("industry", "[Industry]"))
        .labeled("Primary contact", &f.text("clientName", "[Client Name]"))
        .labeled("Email", &f.text("clientEmail", "[Client Email]"))
        .finish()
}

pub(super) fn problem_statement(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let challenges = list_or(
        &f,
        "challenges",
        &[
            "Manual processes slow down daily operations",
            "Existing systems do not scale with demand",
            "Limited visibility into key business metrics",
        ],
    );
    PageBuilder::new(SectionId::ProblemStatement)
        .paragraph(&f.text(
            "problemStatement",
            "[Describe the problem this project solves.]",
        ))
        .heading(3, "Current Challenges")
        .list(&challenges)
        .finish()
}

pub(super) fn objectives(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let goals = list_or(
        &f,
        "objectives",
        &[
            "Deliver a reliable, maintainable solution on schedule",
            "Reduce operational costs through automation",
            "Improve the experience of end users",
            "Provide measurable success criteria for every phase",
        ],
    );
    PageBuilder::new(SectionId::Objectives)
        .paragraph(&format!(
            "The objectives of {} are agreed between {} and {}:",
            project(&f),
            client(&f),
            provider(&f)
        ))
        .ordered_list(&goals)
        .finish()
}

pub(super) fn scope_of_work(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let in_scope = list_or(
        &f,
        "scope",
        &[
            "Requirements analysis and solution design",
            "Implementation and integration",
            "Testing and quality assurance",
            "Deployment and handover",
        ],
    );
    let out_of_scope = list_or(&f, "outOfScope", &["[Items explicitly excluded from this engagement]"]);
    PageBuilder::new(SectionId::ScopeOfWork)
        .heading(3, "In Scope")
        .list(&in_scope)
        .heading(3, "Out of Scope")
        .list(&out_of_scope)
        .finish()
}

pub(super) fn solution_overview(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    PageBuilder::new(SectionId::SolutionOverview)
        .paragraph(&f.text(
            "solution",
            &format!(
                "[Describe the solution {} proposes for {} and how it addresses each challenge.]",
                provider(&f),
                client(&f)
            ),
        ))
        .labeled("Approach", &f.text("approach", "[Delivery Approach]"))
        .finish()
}

pub(super) fn architecture(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let components = list_or(
        &f,
        "architecture.components",
        &[
            "Client Applications",
            "API Gateway",
            "Application Services",
            "Data Layer",
        ],
    );
    PageBuilder::new(SectionId::Architecture)
        .paragraph(&f.text(
            "architecture.description",
            "The solution follows a layered architecture in which each layer communicates only with its neighbours.",
        ))
        .diagram(&diagram::flowchart(&components))
        .list(&components)
        .finish()
}

pub(super) fn technology_stack(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let rows: Vec<Vec<String>> = [
        ("Frontend", "techStack.frontend", "[Frontend Technologies]"),
        ("Backend", "techStack.backend", "[Backend Technologies]"),
        ("Database", "techStack.database", "[Database]"),
        ("Hosting", "techStack.hosting", "[Hosting Platform]"),
        ("Tooling", "techStack.tools", "[Tooling]"),
    ]
    .iter()
    .map(|(layer, path, placeholder)| vec![layer.to_string(), f.text(path, placeholder)])
    .collect();

    let mut page = PageBuilder::new(SectionId::TechnologyStack).table(&["Layer", "Technology"], &rows);
    let extra = f.strings("technologies");
    if !extra.is_empty() {
        page = page.heading(3, "Additional Technologies").list(&extra);
    }
    page.finish()
}

pub(super) fn features(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let listed = f.array("features");
    let mut page = PageBuilder::new(SectionId::Features);
    if listed.is_empty() {
        page = page.list(&[
            "User authentication and role-based access",
            "Dashboard with real-time reporting",
            "Integration with existing systems",
            "Responsive interface for desktop and mobile",
        ]);
    } else {
        for feature in listed {
            page = page
                .heading(3, &item_text(feature, "name", "[Feature]"))
                .paragraph(&item_text(feature, "description", "[Feature description]"));
        }
    }
    page.finish()
}

pub(super) fn methodology(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let steps = list_or(
        &f,
        "methodologySteps",
        &[
            "Discovery: workshops to confirm requirements",
            "Design: architecture and interface prototypes",
            "Build: iterative two-week sprints with demos",
            "Verify: automated and acceptance testing",
            "Launch: deployment, training and handover",
        ],
    );
    PageBuilder::new(SectionId::Methodology)
        .paragraph(&f.text(
            "methodology",
            "We deliver iteratively so that progress is visible and priorities can be adjusted throughout the project.",
        ))
        .ordered_list(&steps)
        .finish()
}

/// Best-effort conversion of a duration like "2 weeks" into days.
fn duration_days(text: &str) -> u32 {
    let lower = text.to_ascii_lowercase();
    let amount: f64 = lower
        .split(|c: char| !(c.is_ascii_digit() || c == '.'))
        .find(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
        .unwrap_or(1.0);
    let unit = if lower.contains("month") {
        30.0
    } else if lower.contains("week") {
        7.0
    } else {
        1.0
    };
    (amount * unit).round().max(1.0) as u32
}

pub(super) fn timeline(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let phases = f.array("phases");

    let rows: Vec<Vec<String>> = phases
        .iter()
        .map(|phase| {
            let p = f.scoped(phase);
            vec![
                p.text("name", "[Phase Name]"),
                p.text("duration", "[Duration]"),
                p.date_or("startDate", "[Start Date]"),
            ]
        })
        .collect();

    let tasks: Vec<GanttTask> = phases
        .iter()
        .enumerate()
        .map(|(i, phase)| {
            let p = f.scoped(phase);
            let start = p
                .get("startDate")
                .and_then(|v| v.as_str())
                .and_then(parse_date)
                .or_else(|| (i == 0).then_some(f.options().today))
                .map(|d| d.format("%Y-%m-%d").to_string());
            GanttTask {
                name: p.text("name", &format!("Phase {}", i + 1)),
                start,
                days: duration_days(&p.text("duration", "1")),
            }
        })
        .collect();

    let mut page = PageBuilder::new(SectionId::Timeline)
        .paragraph(&format!("Planned phases for {}.", project(&f)))
        .table(&["Phase", "Duration", "Start"], &rows);
    if !tasks.is_empty() {
        page = page.diagram(&diagram::gantt(&project(&f), "Phases", &tasks));
    }
    page.finish()
}

pub(super) fn milestones(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let mut events: Vec<(String, String)> = f
        .array("milestones")
        .iter()
        .map(|m| {
            let m = f.scoped(m);
            (m.date_or("date", "[Date]"), m.text("name", "[Milestone]"))
        })
        .collect();
    if events.is_empty() {
        events = f
            .array("phases")
            .iter()
            .map(|phase| {
                let p = f.scoped(phase);
                (
                    p.text("duration", "[Duration]"),
                    format!("{} complete", p.text("name", "[Phase Name]")),
                )
            })
            .collect();
    }

    let rows: Vec<Vec<String>> = events
        .iter()
        .map(|(when, what)| vec![what.clone(), when.clone()])
        .collect();
    let mut page = PageBuilder::new(SectionId::Milestones).table(&["Milestone", "When"], &rows);
    if !events.is_empty() {
        page = page.diagram(&diagram::timeline("Milestones", &events));
    }
    page.finish()
}

pub(super) fn team(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let rows: Vec<Vec<String>> = f
        .array("team")
        .iter()
        .map(|member| {
            let m = f.scoped(member);
            vec![
                m.text("name", "[Name]"),
                m.text("role", "[Role]"),
                m.text("bio", ""),
            ]
        })
        .collect();
    PageBuilder::new(SectionId::Team)
        .paragraph(&format!(
            "{} will staff the project with the following people.",
            provider(&f)
        ))
        .table(&["Name", "Role", "Background"], &rows)
        .finish()
}

pub(super) fn roles_responsibilities(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let ours = list_or(
        &f,
        "responsibilities.provider",
        &[
            "Project management and status reporting",
            "Design, development and testing",
            "Deployment and documentation",
        ],
    );
    let theirs = list_or(
        &f,
        "responsibilities.client",
        &[
            "Timely feedback and approvals",
            "Access to systems, data and stakeholders",
            "A dedicated point of contact",
        ],
    );
    PageBuilder::new(SectionId::RolesResponsibilities)
        .heading(3, &provider(&f))
        .list(&ours)
        .heading(3, &client(&f))
        .list(&theirs)
        .finish()
}

pub(super) fn quality_assurance(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let practices = list_or(
        &f,
        "qualityPractices",
        &[
            "Peer code review for every change",
            "Automated unit and integration tests",
            "User acceptance testing before each release",
        ],
    );
    PageBuilder::new(SectionId::QualityAssurance)
        .paragraph(&f.text(
            "qualityAssurance",
            "Quality is built into every phase of delivery rather than inspected at the end.",
        ))
        .list(&practices)
        .finish()
}

pub(super) fn security_compliance(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let standards = list_or(&f, "compliance", &["[Applicable standards, e.g. GDPR, SOC 2]"]);
    PageBuilder::new(SectionId::SecurityCompliance)
        .paragraph(&f.text(
            "security",
            "Data is encrypted in transit and at rest, access follows the principle of least privilege, and all activity is logged.",
        ))
        .heading(3, "Compliance")
        .list(&standards)
        .finish()
}

fn level_score(level: &str) -> f64 {
    match level.trim().to_ascii_lowercase().as_str() {
        "low" => 0.2,
        "medium" | "moderate" => 0.5,
        "high" => 0.8,
        "critical" | "very high" => 0.95,
        _ => 0.5,
    }
}

pub(super) fn risk_matrix(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let mut rows: Vec<Vec<String>> = f
        .array("risks")
        .iter()
        .map(|risk| {
            let r = f.scoped(risk);
            vec![
                r.text("risk", "[Risk]"),
                r.text("probability", "Medium"),
                r.text("impact", "Medium"),
                r.text("mitigation", "[Mitigation]"),
            ]
        })
        .collect();
    if rows.is_empty() {
        rows = [
            ("Scope creep", "Medium", "High", "Formal change request process"),
            ("Delayed feedback", "Medium", "Medium", "Agreed review windows per milestone"),
            ("Integration issues", "Low", "High", "Early technical spikes against real systems"),
        ]
        .iter()
        .map(|(a, b, c, d)| vec![a.to_string(), b.to_string(), c.to_string(), d.to_string()])
        .collect();
    }

    let points: Vec<(String, f64, f64)> = rows
        .iter()
        .map(|r| (r[0].clone(), level_score(&r[1]), level_score(&r[2])))
        .collect();

    PageBuilder::new(SectionId::RiskMatrix)
        .table(&["Risk", "Probability", "Impact", "Mitigation"], &rows)
        .diagram(&diagram::risk_quadrant(&points))
        .finish()
}

pub(super) fn communication_plan(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    PageBuilder::new(SectionId::CommunicationPlan)
        .details(&[
            ("Status meetings", f.text("communication.meetings", "Weekly")),
            ("Progress reports", f.text("communication.reporting", "Bi-weekly")),
            ("Channels", f.text("communication.channels", "Email, video calls, shared workspace")),
            ("Escalation contact", f.text("communication.escalation", "[Escalation Contact]")),
        ])
        .finish()
}

fn pricing_rows(f: &Fields<'_>) -> Vec<(String, Option<Decimal>)> {
    f.array("pricing")
        .iter()
        .map(|entry| {
            let e = f.scoped(entry);
            (
                e.first_of(&["item", "name"], "[Item]"),
                e.get("cost").and_then(value_to_decimal),
            )
        })
        .collect()
}

fn total_investment(f: &Fields<'_>) -> Option<String> {
    if f.has("totalCost") {
        return Some(f.currency("totalCost", "[Total Investment]"));
    }
    let rows = pricing_rows(f);
    if rows.is_empty() {
        return None;
    }
    // Overflow is rejected before generation.
    let total = checked_sum(rows.iter().filter_map(|(_, cost)| *cost))?;
    Some(f.money(total))
}

pub(super) fn pricing(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let entries = pricing_rows(&f);
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|(item, cost)| {
            vec![
                item.clone(),
                cost.map(|c| f.money(c)).unwrap_or_else(|| "[Cost]".to_string()),
            ]
        })
        .collect();

    let mut page = PageBuilder::new(SectionId::Pricing)
        .table(&["Item", "Cost"], &rows)
        .callout(&format!(
            "Total investment: {}",
            total_investment(&f).unwrap_or_else(|| f.money(Decimal::ZERO))
        ));

    let slices: Vec<(String, f64)> = entries
        .iter()
        .filter_map(|(item, cost)| {
            cost.filter(|c| c.is_sign_positive() && !c.is_zero())
                .and_then(|c| c.to_f64())
                .map(|c| (item.clone(), c))
        })
        .collect();
    if !slices.is_empty() {
        page = page.diagram(&diagram::pie("Investment Breakdown", &slices));
    }
    page.finish()
}

pub(super) fn payment_terms(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let mut rows: Vec<Vec<String>> = f
        .array("paymentSchedule")
        .iter()
        .map(|entry| {
            let e = f.scoped(entry);
            vec![
                e.text("milestone", "[Milestone]"),
                e.resolve(
                    "percentage",
                    crate::interpolate::Format::Percent,
                    crate::interpolate::Fallback::Text("[%]"),
                ),
            ]
        })
        .collect();
    if rows.is_empty() {
        rows = vec![
            vec!["Contract signature".to_string(), "40%".to_string()],
            vec!["Mid-project milestone".to_string(), "30%".to_string()],
            vec!["Final acceptance".to_string(), "30%".to_string()],
        ];
    }
    PageBuilder::new(SectionId::PaymentTerms)
        .table(&["Milestone", "Share"], &rows)
        .paragraph(&f.text(
            "paymentTerms",
            "Invoices are payable within 30 days of the invoice date.",
        ))
        .finish()
}

pub(super) fn support_maintenance(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    PageBuilder::new(SectionId::SupportMaintenance)
        .paragraph(&format!(
            "After launch, {} provides support for {}.",
            provider(&f),
            project(&f)
        ))
        .details(&[
            ("Warranty period", f.text("support.period", "90 days")),
            ("Support hours", f.text("support.hours", "Business days, 9:00-17:00")),
            ("Response time", f.text("support.sla", "Within one business day")),
            ("Ongoing maintenance", f.currency("support.monthlyFee", "[Monthly Fee]")),
        ])
        .finish()
}

pub(super) fn case_studies(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let studies = f.array("caseStudies");
    let mut page = PageBuilder::new(SectionId::CaseStudies);
    if studies.is_empty() {
        page = page.paragraph("[Add relevant projects delivered for similar clients.]");
    }
    for study in studies {
        let s = f.scoped(study);
        page = page
            .heading(3, &s.text("title", "[Case Study]"))
            .labeled("Client", &s.text("client", "[Client]"))
            .paragraph(&s.text("result", "[Outcome]"));
    }
    page.finish()
}

pub(super) fn assumptions(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let items = list_or(
        &f,
        "assumptions",
        &[
            "Requirements are confirmed before the design phase ends",
            "The client provides test data and environments on time",
            "Third-party services remain available under current terms",
        ],
    );
    PageBuilder::new(SectionId::Assumptions).list(&items).finish()
}

pub(super) fn legal_terms(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let terms = list_or(
        &f,
        "terms",
        &[
            "Intellectual property transfers to the client upon full payment.",
            "Both parties keep confidential information disclosed during the project.",
            "Either party may terminate with 30 days written notice.",
            "Liability is limited to the fees paid under this agreement.",
        ],
    );
    PageBuilder::new(SectionId::LegalTerms)
        .ordered_list(&terms)
        .labeled("Governing law", &f.text("governingLaw", "[Jurisdiction]"))
        .finish()
}

pub(super) fn acceptance(ctx: &SectionContext<'_>) -> Page {
    let f = ctx.fields();
    let statement = format!(
        "By signing below, {} accepts this proposal for {} and authorizes {} to begin work.",
        client(&f),
        project(&f),
        provider(&f)
    );
    PageBuilder::new(SectionId::Acceptance)
        .raw(&format!("<p class=\"statement\">{}</p>", escape_html(&statement)))
        .signatures(&[
            ("Client", f.text("clientName", "[Client Name]")),
            ("Provider", f.text("companyInfo.representative", "[Your Name]")),
        ])
        .finish()
}
