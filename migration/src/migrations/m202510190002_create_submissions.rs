use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510190002_create_submissions"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("submissions"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("lecturer_id")).integer().null())
                    .col(ColumnDef::new(Alias::new("register_number")).string().not_null())
                    .col(ColumnDef::new(Alias::new("semester")).string().not_null())
                    .col(ColumnDef::new(Alias::new("branch")).string().not_null())
                    .col(ColumnDef::new(Alias::new("subject_name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("sessional_type")).string().not_null())
                    .col(ColumnDef::new(Alias::new("marks")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("attendance_percent")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("attendance_eligibility")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Alias::new("student_name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("student_email")).string().not_null())
                    .col(ColumnDef::new(Alias::new("approved_at")).timestamp().null())
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .col(
                        ColumnDef::new(Alias::new("updated_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_submissions_lecturer")
                            .from(Alias::new("submissions"), Alias::new("lecturer_id"))
                            .to(Alias::new("lecturers"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_student_key")
                    .table(Alias::new("submissions"))
                    .col(Alias::new("register_number"))
                    .col(Alias::new("semester"))
                    .col(Alias::new("branch"))
                    .col(Alias::new("status"))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("submissions")).to_owned())
            .await
    }
}
